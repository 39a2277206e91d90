use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid theme_file_count: {configured} (min: {min_limit}, max: {max_limit})")]
    ThemeFileCount {
        configured: u8,
        min_limit: u8,
        max_limit: u8,
    },
    #[error("Invalid request_timeout_secs: {configured} (limit: {limit})")]
    RequestTimeout { configured: u64, limit: u64 },
    #[error("Invalid theme_service_url: {configured}")]
    ThemeServiceUrl { configured: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::ThemeFileCount {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Theme file count out of range!\n\n\
                    Your configured value: {configured}\n\
                    Valid range: {min_limit} - {max_limit}\n\n\
                    Please update theme_file_count in config.toml to a value between {min_limit} and {max_limit}."
                )
            }
            ConfigValidationError::RequestTimeout { configured, limit } => {
                format!(
                    "Request timeout too high!\n\n\
                    Your configured value: {configured} seconds\n\
                    Recommended maximum: {limit} seconds\n\n\
                    Please update request_timeout_secs in config.toml, or remove it to wait indefinitely."
                )
            }
            ConfigValidationError::ThemeServiceUrl { configured } => {
                format!(
                    "Theme service URL is not usable!\n\n\
                    Your configured value: '{configured}'\n\n\
                    Please set theme_service_url in config.toml to an http:// or https:// address."
                )
            }
        }
    }
}

/// Configuration loading result
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}
