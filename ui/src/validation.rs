use crate::error::AppError;

/// Core validation trait that all validators must implement.
///
/// Validators are small stateless structs so the editor can hold one per
/// kind of input and run it before a value reaches the settings store.
///
/// # Type Parameters
///
/// * `T` - The type of data being validated (can be unsized like `str`)
///
/// # Examples
///
/// ```
/// use studio::validation::Validator;
///
/// struct NonEmpty;
/// impl Validator<str> for NonEmpty {
///     type Error = String;
///
///     fn validate(&self, input: &str) -> Result<(), Self::Error> {
///         if input.is_empty() {
///             Err("Input cannot be empty".to_string())
///         } else {
///             Ok(())
///         }
///     }
/// }
/// ```
pub trait Validator<T: ?Sized> {
    type Error;

    /// Validate the input and return Ok(()) if valid, or Err with validation error
    fn validate(&self, input: &T) -> Result<(), Self::Error>;
}

/// Validation errors for values typed into the settings editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidColor { value: String, reason: String },
    InvalidBackendUrl { url: String, reason: String },
    InvalidFlagName { name: String, reason: String },
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::InvalidColor { value, reason } => {
                format!(
                    "Invalid color: '{value}'\n\n\
                    Reason: {reason}\n\n\
                    Use #rgb, #rgba, #rrggbb, #rrggbbaa or a basic color name."
                )
            }
            ValidationError::InvalidBackendUrl { url, reason } => {
                format!(
                    "Invalid backend URL: '{url}'\n\n\
                    Reason: {reason}\n\n\
                    Leave it empty or use an http:// or https:// address."
                )
            }
            ValidationError::InvalidFlagName { name, reason } => {
                format!(
                    "Invalid feature flag name: '{name}'\n\n\
                    Reason: {reason}"
                )
            }
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Validation(error.user_message())
    }
}

const NAMED_COLORS: [&str; 18] = [
    "black",
    "white",
    "red",
    "green",
    "blue",
    "yellow",
    "magenta",
    "cyan",
    "gray",
    "grey",
    "orange",
    "purple",
    "pink",
    "brown",
    "navy",
    "teal",
    "silver",
    "transparent",
];

/// Validator for color values
pub struct ColorValidator;

impl Validator<str> for ColorValidator {
    type Error = ValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        let invalid = |reason: &str| ValidationError::InvalidColor {
            value: input.to_string(),
            reason: reason.to_string(),
        };

        if input.trim().is_empty() {
            return Err(invalid("Color cannot be empty"));
        }

        match input.strip_prefix('#') {
            Some(hex) => {
                if !matches!(hex.len(), 3 | 4 | 6 | 8) {
                    return Err(invalid("Hex colors need 3, 4, 6 or 8 digits"));
                }
                if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(invalid("Hex colors may only contain 0-9 and a-f"));
                }
                Ok(())
            }
            None if NAMED_COLORS.contains(&input.to_lowercase().as_str()) => Ok(()),
            None => Err(invalid("Unknown color name")),
        }
    }
}

/// Validator for the backend URL field
pub struct BackendUrlValidator;

impl Validator<str> for BackendUrlValidator {
    type Error = ValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        // An empty URL disables the backend
        if input.is_empty() {
            return Ok(());
        }

        let invalid = |reason: &str| ValidationError::InvalidBackendUrl {
            url: input.to_string(),
            reason: reason.to_string(),
        };

        let rest = input
            .strip_prefix("https://")
            .or_else(|| input.strip_prefix("http://"))
            .ok_or_else(|| invalid("URL must start with http:// or https://"))?;

        if rest.is_empty() || rest.starts_with('/') {
            return Err(invalid("URL is missing a host"));
        }
        if input.chars().any(char::is_whitespace) {
            return Err(invalid("URL cannot contain whitespace"));
        }

        Ok(())
    }
}

/// Validator for feature flag names
pub struct FlagNameValidator;

impl Validator<str> for FlagNameValidator {
    type Error = ValidationError;

    fn validate(&self, input: &str) -> Result<(), Self::Error> {
        let invalid = |reason: &str| ValidationError::InvalidFlagName {
            name: input.to_string(),
            reason: reason.to_string(),
        };

        if input.is_empty() {
            return Err(invalid("Name cannot be empty"));
        }
        if input.len() > 50 {
            return Err(invalid("Name too long (max 50 characters)"));
        }
        if !input
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid(
                "Name contains invalid characters (only alphanumeric, hyphens, and underscores allowed)",
            ));
        }

        Ok(())
    }
}
