use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    catalog::{self, Catalog, EntryRecord},
    constants::FILE_NAMES,
    error::CatalogLoadError,
};

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "timegate", "timegate")
}

pub fn get_data_dir() -> PathBuf {
    if Path::new(".").join(FILE_NAMES.catalog).exists() {
        return PathBuf::from(".");
    }

    if let Some(proj_dirs) = project_dirs() {
        let data_dir = proj_dirs.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir).ok();
        data_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        let dir = proj_dirs.config_dir().to_path_buf();
        fs::create_dir_all(&dir).ok();
        dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_state_dir() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        if let Some(state_dir) = proj_dirs.state_dir() {
            let dir = state_dir.to_path_buf();
            fs::create_dir_all(&dir).ok();
            return dir;
        }
    }
    PathBuf::from(".")
}

pub fn get_catalog_path() -> PathBuf {
    get_data_dir().join(FILE_NAMES.catalog)
}

pub fn get_settings_path() -> PathBuf {
    get_config_dir().join(FILE_NAMES.settings)
}

pub fn get_log_path() -> PathBuf {
    get_state_dir().join(FILE_NAMES.log)
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<EntryRecord> =
        serde_json::from_str(&content).map_err(|source| CatalogLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let catalog = Catalog::from_records(records)?;
    log::info!(
        "loaded {} catalog entries from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

pub fn resolve_catalog(explicit: Option<&Path>) -> Result<Catalog, CatalogLoadError> {
    if let Some(path) = explicit {
        return load_catalog(path);
    }

    let user_catalog = get_catalog_path();
    if user_catalog.exists() {
        return load_catalog(&user_catalog);
    }

    log::info!("no catalog file found, using the built-in catalog");
    Ok(catalog::builtin()?)
}

pub fn save_catalog(path: &Path, catalog: &Catalog) -> Result<(), String> {
    write_json_atomic(path, &catalog.to_records())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    atomic_write(path, &json)
}

pub fn atomic_write(path: &Path, content: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| e.to_string())?;
    tmp_file
        .write_all(content.as_bytes())
        .map_err(|e| e.to_string())?;
    tmp_file.sync_all().map_err(|e| e.to_string())?;
    fs::rename(&tmp_path, path).map_err(|e| e.to_string())?;
    Ok(())
}
