//! # Palette Studio
//!
//! Settings editor for a color theme: named color fields, an accent list,
//! feature flags and a backend URL, with palettes generated by a remote theme
//! service. The color and theme machinery lives in the `engine` crate; this
//! crate wires it to configuration, logging and a command line front end.
//!
//! ## Modules
//!
//! - [`cli`] - Command line arguments and command dispatch
//! - [`config`] - Configuration loading, validation and setup
//! - [`editor`] - Editing session over the persisted settings
//! - [`error`] - Error types shown to the user
//! - [`logger`] - Logging configuration
//! - [`validation`] - Input validation for editor fields

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod logger;
pub mod validation;

pub use editor::SettingsEditor;
pub use error::AppError;
pub use validation::Validator;
