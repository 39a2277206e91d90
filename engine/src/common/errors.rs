use std::path::PathBuf;
use thiserror::Error;

/// Failures while retrieving palettes from the theme service.
///
/// All variants are scoped to a single generate action; nothing is retried
/// automatically and the palette cache is left untouched.
///
/// # Error Categories
///
/// - [`Status`] - The service answered with a non-success HTTP status
/// - [`Transport`] - The request never produced a response
/// - [`Decode`] - The response body was not a valid theme batch
///
/// [`Status`]: ThemeError::Status
/// [`Transport`]: ThemeError::Transport
/// [`Decode`]: ThemeError::Decode
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Theme request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Theme request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Invalid theme response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl ThemeError {
    /// HTTP status carried by the error, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ThemeError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from the local key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid storage key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Failed to create storage directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Stored value under '{key}' is not valid settings JSON: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors while importing a settings file chosen by the user.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read import file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Import file {path} is not valid settings JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Errors while exporting persisted settings to a file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to write export file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
