use super::{LoggingConfig, limits::*, setup, validation::ConfigValidationError};
use engine::theme::DEFAULT_THEME_FILE_COUNT;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_THEME_SERVICE_URL: &str = "http://localhost:8080";

/// Main application configuration
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    theme_service_url: Option<String>,
    theme_file_count: Option<u8>,
    request_timeout_secs: Option<u64>,
    storage_dir: Option<String>,

    #[serde(default)]
    logging: LoggingConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let file_count = self.theme_file_count();
        if !(MIN_THEME_FILE_COUNT..=MAX_THEME_FILE_COUNT).contains(&file_count) {
            errors.push(ConfigValidationError::ThemeFileCount {
                configured: file_count,
                min_limit: MIN_THEME_FILE_COUNT,
                max_limit: MAX_THEME_FILE_COUNT,
            });
        }

        if let Some(timeout) = self.request_timeout_secs {
            if timeout == 0 || timeout > MAX_REQUEST_TIMEOUT_SECS {
                errors.push(ConfigValidationError::RequestTimeout {
                    configured: timeout,
                    limit: MAX_REQUEST_TIMEOUT_SECS,
                });
            }
        }

        let url = self.theme_service_url();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigValidationError::ThemeServiceUrl {
                configured: url.to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn theme_service_url(&self) -> &str {
        self.theme_service_url
            .as_deref()
            .unwrap_or(DEFAULT_THEME_SERVICE_URL)
    }

    pub fn theme_file_count(&self) -> u8 {
        self.theme_file_count.unwrap_or(DEFAULT_THEME_FILE_COUNT)
    }

    /// Timeout for theme requests; `None` waits for as long as the server does.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Directory holding persisted settings.
    pub fn storage_dir(&self) -> PathBuf {
        match &self.storage_dir {
            Some(dir) => PathBuf::from(dir),
            None => setup::get_storage_dir().unwrap_or_else(|e| {
                log::warn!("{e}, storing settings in the current directory");
                PathBuf::from("storage")
            }),
        }
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.theme_service_url(), "http://localhost:8080");
        assert_eq!(config.theme_file_count(), 10);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.logging().level(), "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_values_from_toml() {
        let config = parse(
            r#"
            theme_service_url = "https://themes.example.com"
            theme_file_count = 4
            request_timeout_secs = 15
            storage_dir = "/tmp/palette-studio"

            [logging]
            level = "debug"
            "#,
        );

        assert_eq!(config.theme_service_url(), "https://themes.example.com");
        assert_eq!(config.theme_file_count(), 4);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.storage_dir(), PathBuf::from("/tmp/palette-studio"));
        assert_eq!(config.logging().level(), "debug");
    }

    #[test]
    fn test_validation_collects_every_error() {
        let config = parse(
            r#"
            theme_service_url = "themes.example.com"
            theme_file_count = 0
            request_timeout_secs = 3600
            "#,
        );

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| !e.user_message().is_empty()));
    }
}
