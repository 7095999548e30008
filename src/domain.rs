use std::{fmt, sync::Arc};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::{constants::URGENCY, error::CatalogError};

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        EntryId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct RecurrenceTime {
    hours: u32,
    minutes: u32,
    window_end: NaiveTime,
}

impl RecurrenceTime {
    pub fn new(hours: u32, minutes: u32) -> Result<Self, CatalogError> {
        if hours > 23 {
            return Err(CatalogError::HourOutOfRange(hours));
        }
        if minutes > 59 {
            return Err(CatalogError::MinuteOutOfRange(minutes));
        }
        let window_end = NaiveTime::from_hms_milli_opt(hours, minutes, 59, 999)
            .ok_or(CatalogError::MinuteOutOfRange(minutes))?;
        Ok(Self {
            hours,
            minutes,
            window_end,
        })
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Last representable instant of the active minute (`HH:MM:59.999`).
    pub fn window_end(&self) -> NaiveTime {
        self.window_end
    }
}

impl fmt::Display for RecurrenceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    id: EntryId,
    name: String,
    description: String,
    url: String,
    protocol: String,
    authors: Vec<Author>,
    canonical_time: String,
    recurrence_times: Vec<RecurrenceTime>,
}

impl CatalogEntry {
    pub fn new(
        id: EntryId,
        name: impl Into<String>,
        recurrence_times: Vec<RecurrenceTime>,
    ) -> Result<Self, CatalogError> {
        let Some(first) = recurrence_times.first() else {
            return Err(CatalogError::for_entry(
                id.as_str(),
                CatalogError::EmptyRecurrence,
            ));
        };

        Ok(Self {
            canonical_time: first.to_string(),
            id,
            name: name.into(),
            description: String::new(),
            url: String::new(),
            protocol: "http".to_string(),
            authors: Vec::new(),
            recurrence_times,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn with_authors(mut self, authors: Vec<Author>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_canonical_time(mut self, label: impl Into<String>) -> Self {
        self.canonical_time = label.into();
        self
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn canonical_time(&self) -> &str {
        &self.canonical_time
    }

    pub fn recurrence_times(&self) -> &[RecurrenceTime] {
        &self.recurrence_times
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Now,
    Soon,
    Later,
}

impl UrgencyTier {
    pub fn classify(remaining_seconds: i64) -> Self {
        if remaining_seconds < 0 {
            UrgencyTier::Now
        } else if remaining_seconds < URGENCY.soon_window_secs {
            UrgencyTier::Soon
        } else {
            UrgencyTier::Later
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UrgencyTier::Now => "now",
            UrgencyTier::Soon => "soon",
            UrgencyTier::Later => "later",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedEntry {
    pub entry: Arc<CatalogEntry>,
    pub remaining_seconds: i64,
    pub tier: UrgencyTier,
}
