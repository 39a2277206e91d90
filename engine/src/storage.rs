//! Local key-value storage and settings persistence.
//!
//! [`LocalStorage`] keeps one JSON document per key in a directory. Settings
//! live under [`SETTINGS_STORAGE_KEY`]; they are read at session start and
//! written only on an explicit save. Import reads a user-chosen file and
//! export writes the persisted value (not unsaved edits) next to the user.

use crate::common::{ExportError, ImportError, StorageError};
use crate::settings::Settings;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage key the settings document is kept under.
pub const SETTINGS_STORAGE_KEY: &str = "settings";

/// File name written by [`export_settings`].
pub const EXPORT_FILE_NAME: &str = "settings.json";

const MAX_KEY_LENGTH: usize = 64;

/// Directory-backed key-value store holding text values.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Open storage rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }

    /// Read the value stored under `key`, or `None` if nothing was stored.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|source| StorageError::CreateDir {
            path: self.root.clone(),
            source,
        })?;
        fs::write(&path, value).map_err(|source| StorageError::Write { path, source })
    }

    /// Remove `key`. Returns `false` when there was nothing to remove.
    pub fn remove_item(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StorageError::Write { path, source }),
        }
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let reason = if key.is_empty() {
        "Key cannot be empty"
    } else if key.len() > MAX_KEY_LENGTH {
        "Key too long (max 64 characters)"
    } else if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        "Key contains invalid characters (only alphanumeric, hyphens, and underscores allowed)"
    } else {
        return Ok(());
    };

    Err(StorageError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    })
}

/// Load persisted settings, falling back to defaults when none were saved.
pub fn load_settings(storage: &LocalStorage) -> Result<Settings, StorageError> {
    match storage.get_item(SETTINGS_STORAGE_KEY)? {
        Some(json) => serde_json::from_str(&json).map_err(|source| StorageError::Corrupt {
            key: SETTINGS_STORAGE_KEY.to_string(),
            source,
        }),
        None => {
            log::info!("No saved settings found, using defaults");
            Ok(Settings::default())
        }
    }
}

pub fn save_settings(storage: &LocalStorage, settings: &Settings) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(settings)?;
    storage.set_item(SETTINGS_STORAGE_KEY, &json)?;
    log::info!("Settings saved to {}", storage.root().display());
    Ok(())
}

/// Read and parse a settings file chosen by the user.
///
/// The result is meant to replace the edited settings wholesale; there is no
/// merging with the current values.
pub async fn import_settings(path: &Path) -> Result<Settings, ImportError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let settings = serde_json::from_str(&content).map_err(|source| ImportError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Imported settings from {}", path.display());
    Ok(settings)
}

/// Write the persisted settings to `dir/settings.json` and return that path.
///
/// When nothing has been saved yet the default settings are exported.
pub fn export_settings(storage: &LocalStorage, dir: &Path) -> Result<PathBuf, ExportError> {
    let json = match storage.get_item(SETTINGS_STORAGE_KEY)? {
        Some(json) => json,
        None => serde_json::to_string_pretty(&Settings::default()).map_err(StorageError::from)?,
    };

    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, json).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    log::info!("Exported settings to {}", path.display());
    Ok(path)
}
