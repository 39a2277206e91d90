use engine::common::{ExportError, ImportError, StorageError, ThemeError};
use std::fmt::Display;

/// Application-wide error type for the settings editor.
///
/// Every failure is scoped to the single user action that caused it; none of
/// them is fatal to an editing session. Engine errors are converted into
/// these variants at the editor boundary so the front end can show one
/// message per action.
///
/// # Error Categories
///
/// ## Action Errors
/// - [`Theme`] - Palette generation failed (HTTP status, transport, bad body)
/// - [`Import`] - A settings file could not be read or parsed
/// - [`Storage`] - Persisted settings could not be read, written or exported
///
/// ## Input and Setup Errors
/// - [`Validation`] - A value typed into the editor was rejected
/// - [`Config`] - Configuration loading and validation errors
/// - [`State`] - An operation referred to something that does not exist
///
/// # Examples
///
/// ```no_run
/// use studio::error::AppError;
///
/// fn describe(error: &AppError) -> &'static str {
///     match error {
///         AppError::Theme(_) => "Theme generation failed",
///         AppError::Import(_) => "Import failed",
///         _ => "Something went wrong",
///     }
/// }
/// ```
///
/// [`Theme`]: AppError::Theme
/// [`Import`]: AppError::Import
/// [`Storage`]: AppError::Storage
/// [`Validation`]: AppError::Validation
/// [`Config`]: AppError::Config
/// [`State`]: AppError::State
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Remote theme generation failures.
    ///
    /// Carries the fetcher's message, which includes the HTTP status when the
    /// service answered. The user re-triggers generation to try again.
    Theme(String),

    /// Settings import failures, including malformed JSON.
    ///
    /// The edited settings are left as they were before the import.
    Import(String),

    /// Local storage and export failures.
    Storage(String),

    /// Rejected user input.
    Validation(String),

    /// Configuration loading and validation errors.
    Config(String),

    /// Operations on state that does not exist, such as an accent index past
    /// the end of the list.
    State(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Theme(msg) => write!(f, "Theme Error: {msg}"),
            AppError::Import(msg) => write!(f, "Import Error: {msg}"),
            AppError::Storage(msg) => write!(f, "Storage Error: {msg}"),
            AppError::Validation(msg) => write!(f, "Validation Error: {msg}"),
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::State(msg) => write!(f, "State Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Message shown to the user in place of the failed action's result.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Theme(msg) => format!("Could not generate a theme: {msg}"),
            AppError::Import(msg) => format!("Could not import settings: {msg}"),
            AppError::Storage(msg) => format!("Could not access saved settings: {msg}"),
            AppError::Validation(msg) | AppError::Config(msg) | AppError::State(msg) => {
                msg.clone()
            }
        }
    }
}

impl From<ThemeError> for AppError {
    fn from(err: ThemeError) -> Self {
        AppError::Theme(err.to_string())
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        AppError::Import(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_error_keeps_status_in_message() {
        let error = AppError::from(ThemeError::Status {
            url: "http://localhost/themes/light/01.json".to_string(),
            status: 503,
        });

        assert!(matches!(error, AppError::Theme(_)));
        assert!(error.user_message().contains("503"));
        assert!(error.to_string().starts_with("Theme Error:"));
    }

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let error = AppError::Validation("Invalid color".to_string());
        assert_eq!(error.user_message(), "Invalid color");
    }
}
