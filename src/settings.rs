use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    constants::{DARK_PALETTE, LIGHT_PALETTE, Palette, TIME_SETTINGS},
    storage,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => DARK_PALETTE,
            Theme::Light => LIGHT_PALETTE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tick_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: TIME_SETTINGS.tick_ms,
            catalog: None,
            theme: Theme::Dark,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match storage::read_json::<Settings>(path) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!(
                    "could not load settings from {}: {}, using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        storage::write_json_atomic(path, self)
    }

    fn sanitized(mut self) -> Self {
        if self.tick_ms == 0 {
            log::warn!("tick_ms must be positive, using {}", TIME_SETTINGS.tick_ms);
            self.tick_ms = TIME_SETTINGS.tick_ms;
        }
        self
    }
}
