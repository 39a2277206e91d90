//! Hard limits for configuration values

/// Theme files are named with two digits, so the rotation cannot exceed 99
pub const MAX_THEME_FILE_COUNT: u8 = 99;

/// The rotation needs at least one file to read
pub const MIN_THEME_FILE_COUNT: u8 = 1;

/// Maximum reasonable timeout for a theme request (5 minutes)
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
