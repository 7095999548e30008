use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("hour {0} is out of range (0-23)")]
    HourOutOfRange(u32),

    #[error("minute {0} is out of range (0-59)")]
    MinuteOutOfRange(u32),

    #[error("no recurrence times")]
    EmptyRecurrence,

    #[error("entry at position {0} has an empty id")]
    EmptyId(usize),

    #[error("duplicate entry id '{0}'")]
    DuplicateId(String),

    #[error("duplicate entry name '{0}'")]
    DuplicateName(String),

    #[error("entry '{id}': {source}")]
    Entry {
        id: String,
        source: Box<CatalogError>,
    },
}

impl CatalogError {
    pub fn for_entry(id: &str, source: CatalogError) -> Self {
        CatalogError::Entry {
            id: id.to_string(),
            source: Box::new(source),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("could not read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] CatalogError),
}
