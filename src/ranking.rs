use std::sync::mpsc::Receiver;

use chrono::{DateTime, Local, TimeZone};

use crate::{
    catalog::Catalog,
    domain::{CatalogEntry, EntryId, RankedEntry},
    schedule,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FocusState {
    Unset,
    Defaulted(EntryId),
    Requested(EntryId),
}

impl FocusState {
    pub fn entry_id(&self) -> Option<&EntryId> {
        match self {
            FocusState::Unset => None,
            FocusState::Defaulted(id) | FocusState::Requested(id) => Some(id),
        }
    }
}

pub struct LiveRanking<Tz: TimeZone = Local> {
    catalog: Catalog,
    ticks: Receiver<DateTime<Tz>>,
    ranking: Vec<RankedEntry>,
    focus: FocusState,
    last_tick: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> LiveRanking<Tz> {
    pub fn new(catalog: Catalog, ticks: Receiver<DateTime<Tz>>) -> Self {
        Self {
            catalog,
            ticks,
            ranking: Vec::new(),
            focus: FocusState::Unset,
            last_tick: None,
        }
    }

    /// Applies the most recent pending tick, discarding older ones. Returns
    /// whether a tick was applied.
    pub fn pump(&mut self) -> bool {
        let mut pending = self.ticks.try_iter().peekable();
        let mut skipped = 0usize;
        let mut latest = None;

        while let Some(now) = pending.next() {
            if pending.peek().is_some() {
                skipped += 1;
            }
            latest = Some(now);
        }

        if skipped > 0 {
            log::trace!("coalesced {} stale ticks", skipped);
        }

        match latest {
            Some(now) => {
                self.apply_tick(now);
                true
            }
            None => false,
        }
    }

    pub fn apply_tick(&mut self, now: DateTime<Tz>) {
        self.ranking = schedule::rank(&now, self.catalog.entries());

        if self.focus == FocusState::Unset {
            if let Some(first) = self.ranking.first() {
                let id = first.entry.id().clone();
                log::debug!("defaulting focus to '{}'", id);
                self.focus = FocusState::Defaulted(id);
            }
        }

        self.last_tick = Some(now);
    }

    /// Focuses `id`. Unknown ids are ignored and reported as `false`.
    pub fn request_focus(&mut self, id: &EntryId) -> bool {
        if !self.catalog.contains(id) {
            log::debug!("ignoring focus request for unknown entry '{}'", id);
            return false;
        }

        if self.focus.entry_id() != Some(id) {
            log::debug!("focus moved to '{}'", id);
        }
        self.focus = FocusState::Requested(id.clone());
        true
    }

    pub fn current_ranking(&self) -> &[RankedEntry] {
        &self.ranking
    }

    pub fn focused_entry(&self) -> Option<&CatalogEntry> {
        self.focus
            .entry_id()
            .and_then(|id| self.catalog.get(id))
            .map(|entry| entry.as_ref())
    }

    pub fn focused_ranked(&self) -> Option<&RankedEntry> {
        let id = self.focus.entry_id()?;
        self.ranking.iter().find(|ranked| ranked.entry.id() == id)
    }

    pub fn focus_state(&self) -> &FocusState {
        &self.focus
    }

    pub fn last_tick(&self) -> Option<&DateTime<Tz>> {
        self.last_tick.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
