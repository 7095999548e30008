use std::{collections::HashSet, sync::Arc};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Author, CatalogEntry, EntryId, RecurrenceTime},
    error::CatalogError,
};

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<Arc<CatalogEntry>>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();

        for entry in &entries {
            if !ids.insert(entry.id().clone()) {
                return Err(CatalogError::DuplicateId(entry.id().to_string()));
            }
            if !names.insert(entry.name()) {
                return Err(CatalogError::DuplicateName(entry.name().to_string()));
            }
        }

        Ok(Self {
            entries: entries.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn from_records(records: Vec<EntryRecord>) -> Result<Self, CatalogError> {
        let entries = records
            .into_iter()
            .enumerate()
            .map(|(position, record)| record.into_entry(position))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    pub fn to_records(&self) -> Vec<EntryRecord> {
        self.entries
            .iter()
            .map(|entry| EntryRecord::from_entry(entry))
            .collect()
    }

    pub fn entries(&self) -> &[Arc<CatalogEntry>] {
        &self.entries
    }

    pub fn get(&self, id: &EntryId) -> Option<&Arc<CatalogEntry>> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRecord {
    pub hours: u32,
    pub minutes: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_time: Option<String>,
    pub times: Vec<TimeRecord>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub twice_daily: bool,
}

fn default_protocol() -> String {
    "http".to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl EntryRecord {
    fn into_entry(self, position: usize) -> Result<CatalogEntry, CatalogError> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return Err(CatalogError::EmptyId(position));
        }

        let times = self
            .expanded_times()
            .into_iter()
            .map(|t| RecurrenceTime::new(t.hours, t.minutes))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| CatalogError::for_entry(&id, err))?;

        let mut entry = CatalogEntry::new(EntryId::new(id), self.name, times)?
            .with_description(self.description)
            .with_url(self.url)
            .with_protocol(self.protocol)
            .with_authors(self.authors);
        if let Some(label) = self.canonical_time {
            entry = entry.with_canonical_time(label);
        }
        Ok(entry)
    }

    fn expanded_times(&self) -> Vec<TimeRecord> {
        if !self.twice_daily {
            return self.times.clone();
        }

        self.times
            .iter()
            .flat_map(|&t| {
                let evening = (t.hours < 12).then(|| TimeRecord {
                    hours: t.hours + 12,
                    minutes: t.minutes,
                });
                std::iter::once(t).chain(evening)
            })
            .unique()
            .collect()
    }

    fn mirrored(mut self) -> Self {
        self.twice_daily = true;
        self
    }

    fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id().to_string(),
            name: entry.name().to_string(),
            description: entry.description().to_string(),
            url: entry.url().to_string(),
            protocol: entry.protocol().to_string(),
            authors: entry.authors().to_vec(),
            canonical_time: Some(entry.canonical_time().to_string()),
            times: entry
                .recurrence_times()
                .iter()
                .map(|t| TimeRecord {
                    hours: t.hours(),
                    minutes: t.minutes(),
                })
                .collect(),
            twice_daily: false,
        }
    }
}

fn author(name: &str, url: &str) -> Author {
    Author {
        name: name.to_string(),
        url: url.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    name: &str,
    description: &str,
    url: &str,
    protocol: &str,
    authors: Vec<Author>,
    canonical_time: &str,
    times: Vec<TimeRecord>,
) -> EntryRecord {
    EntryRecord {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        url: url.to_string(),
        protocol: protocol.to_string(),
        authors,
        canonical_time: Some(canonical_time.to_string()),
        times,
        twice_daily: false,
    }
}

fn at(hours: u32, minutes: u32) -> TimeRecord {
    TimeRecord { hours, minutes }
}

pub fn builtin() -> Result<Catalog, CatalogError> {
    let luke = author("luke", "https://lukefelixtaylor.com/");

    let records = vec![
        record(
            "make-a-fish",
            "make a fish",
            "a random fish generator that only works at 11:11 each morning and evening, in your local timezone.",
            "https://fishmultiplex.lftq.in/makeafish",
            "http",
            vec![author("willow", "https://weepingwitch.github.io/")],
            "11:11",
            vec![at(11, 11)],
        )
        .mirrored(),
        record(
            "fish-lftq",
            "fish.lftq.in",
            "minecraft-inspired 3D fish",
            "https://fish.lftq.in/",
            "http",
            vec![luke.clone()],
            "11:11",
            vec![at(11, 11)],
        )
        .mirrored(),
        record(
            "bake-a-dish",
            "bake a dish",
            "a random allrecipies generator that only works as 22:22",
            "https://tris.fyi/dish",
            "http",
            vec![author("tris", "https://tris.fyi/")],
            "22:22",
            vec![at(22, 22)],
        ),
        record(
            "ssh-a-fissh",
            "ssh a fissh",
            "a random ASCII fish generator that works over SSH",
            "https://fissh.breq.dev/",
            "ssh",
            vec![
                author("brooke", "https://breq.dev/"),
                author("ava", "https://avasilver.dev/"),
            ],
            "11:11",
            vec![at(11, 11)],
        )
        .mirrored(),
        record(
            "x11-make-a-fish",
            "X11:11 make a fish",
            "a random fish generator that connects to your X11 server to draw a fish",
            "https://miakizz.quest/xfish",
            "x11",
            vec![author("mia", "https://miakizz.quest/")],
            "11:11",
            vec![at(11, 11)],
        )
        .mirrored(),
        record(
            "make-a-byte",
            "2:55 make a byte",
            "random byte generator that shows the ASCII, bin, and hex",
            "https://makeabyte.lftq.in/",
            "http",
            vec![luke],
            "02:55",
            vec![at(2, 55)],
        )
        .mirrored(),
        record(
            "dial-a-fish",
            "dial-a-fish",
            "SSTV-encoded fish delivered over a telephone call",
            "https://queercomputerclub.ca/projects/quecey-voip/",
            "tel",
            vec![
                author("ari", "https://adryd.com/"),
                author("blackle", "https://suricrasia.online/"),
            ],
            "**:11",
            (0..23).map(|hour| at(hour, 11)).collect(),
        ),
    ];

    Catalog::from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(id: &str, name: &str, times: Vec<TimeRecord>) -> EntryRecord {
        EntryRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            url: String::new(),
            protocol: default_protocol(),
            authors: Vec::new(),
            canonical_time: None,
            times,
            twice_daily: false,
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = builtin().unwrap();
        assert_eq!(catalog.len(), 7);

        let fish = catalog.get(&EntryId::new("make-a-fish")).unwrap();
        assert_eq!(fish.recurrence_times().len(), 2);
        assert_eq!(fish.recurrence_times()[1].to_string(), "23:11");

        let dish = catalog.get(&EntryId::new("bake-a-dish")).unwrap();
        assert_eq!(dish.recurrence_times().len(), 1);

        let dial = catalog.get(&EntryId::new("dial-a-fish")).unwrap();
        assert_eq!(dial.recurrence_times().len(), 23);
        assert_eq!(dial.recurrence_times()[22].to_string(), "22:11");
        assert!(
            dial.recurrence_times()
                .iter()
                .all(|time| time.hours() != 23)
        );
        assert_eq!(dial.canonical_time(), "**:11");
    }

    #[test]
    fn test_rejects_empty_recurrence() {
        let err = Catalog::from_records(vec![plain("empty", "empty", Vec::new())]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::for_entry("empty", CatalogError::EmptyRecurrence)
        );
    }

    #[test]
    fn test_rejects_out_of_range_times() {
        let err = Catalog::from_records(vec![plain("late", "late", vec![at(24, 0)])]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::for_entry("late", CatalogError::HourOutOfRange(24))
        );

        let err =
            Catalog::from_records(vec![plain("odd", "odd", vec![at(1, 60)])]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::for_entry("odd", CatalogError::MinuteOutOfRange(60))
        );
    }

    #[test]
    fn test_rejects_duplicate_ids_and_names() {
        let err = Catalog::from_records(vec![
            plain("fish", "make a fish", vec![at(11, 11)]),
            plain("fish", "other fish", vec![at(23, 11)]),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("fish".to_string()));

        let err = Catalog::from_records(vec![
            plain("fish", "make a fish", vec![at(11, 11)]),
            plain("fish-2", "make a fish", vec![at(23, 11)]),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateName("make a fish".to_string()));
    }

    #[test]
    fn test_rejects_blank_id() {
        let err = Catalog::from_records(vec![
            plain("ok", "ok", vec![at(1, 1)]),
            plain("  ", "blank", vec![at(1, 1)]),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::EmptyId(1));
    }

    #[test]
    fn test_twice_daily_expands_morning_times_only() {
        let mut entry = plain("byte", "byte", vec![at(2, 55), at(14, 55), at(20, 0)]);
        entry.twice_daily = true;

        let catalog = Catalog::from_records(vec![entry]).unwrap();
        let times: Vec<String> = catalog.entries()[0]
            .recurrence_times()
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(times, vec!["02:55", "14:55", "20:00"]);
    }

    #[test]
    fn test_records_parse_from_json() {
        let json = r#"[
            {
                "id": "fish",
                "name": "make a fish",
                "authors": [{ "name": "willow" }],
                "times": [{ "hours": 11, "minutes": 11 }],
                "twice_daily": true
            }
        ]"#;
        let records: Vec<EntryRecord> = serde_json::from_str(json).unwrap();
        let catalog = Catalog::from_records(records).unwrap();

        let fish = &catalog.entries()[0];
        assert_eq!(fish.protocol(), "http");
        assert_eq!(fish.canonical_time(), "11:11");
        assert_eq!(fish.authors()[0].name, "willow");
        assert_eq!(fish.recurrence_times().len(), 2);
    }

    #[test]
    fn test_to_records_preserves_entries() {
        let catalog = builtin().unwrap();
        let rebuilt = Catalog::from_records(catalog.to_records()).unwrap();

        assert_eq!(rebuilt.len(), catalog.len());
        for (a, b) in catalog.entries().iter().zip(rebuilt.entries()) {
            assert_eq!(a, b);
        }
    }
}
