use super::defaults::DEFAULT_CONFIG;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR_NAME: &str = "palette-studio";

#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum SetupError {
    #[error("Failed to determine config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to create directory {path}: {source}")]
    CreateDirError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write file {path}: {source}")]
    WriteFileError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Get the standard configuration directory for the current platform
pub fn get_config_dir() -> Result<PathBuf, SetupError> {
    // Prefer ~/.config/palette-studio on Unix-like systems, fall back to platform defaults
    if cfg!(unix) {
        if let Some(mut home_path) = dirs::home_dir() {
            home_path.push(".config");
            home_path.push(APP_DIR_NAME);
            return Ok(home_path);
        }
    }

    dirs::config_dir()
        .map(|mut path| {
            path.push(APP_DIR_NAME);
            path
        })
        .ok_or_else(|| {
            SetupError::ConfigDirError("Unable to determine config directory".to_string())
        })
}

/// Get the standard configuration file path
pub fn get_config_file_path() -> Result<PathBuf, SetupError> {
    let mut config_dir = get_config_dir()?;
    config_dir.push("config.toml");
    Ok(config_dir)
}

/// Get the directory persisted settings are stored in
pub fn get_storage_dir() -> Result<PathBuf, SetupError> {
    let mut config_dir = get_config_dir()?;
    config_dir.push("storage");
    Ok(config_dir)
}

/// Write the default config.toml into `config_dir` unless one already exists.
///
/// Returns the config file path and whether it was newly written.
pub fn initialize_config_dir(config_dir: &Path) -> Result<(PathBuf, bool), SetupError> {
    create_dir_if_not_exists(config_dir)?;

    let config_file = config_dir.join("config.toml");
    if config_file.exists() {
        log::info!("Config file already exists at {}", config_file.display());
        return Ok((config_file, false));
    }

    fs::write(&config_file, DEFAULT_CONFIG).map_err(|source| SetupError::WriteFileError {
        path: config_file.clone(),
        source,
    })?;

    log::info!("Wrote default config to {}", config_file.display());
    Ok((config_file, true))
}

fn create_dir_if_not_exists(path: &Path) -> Result<(), SetupError> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|source| SetupError::CreateDirError {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
