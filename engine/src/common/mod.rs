pub mod errors;

pub use errors::{ExportError, ImportError, StorageError, ThemeError};
