//! # Theme Generation
//!
//! Turns the remote theme-suggestion service into settings changes:
//!
//! - [`ThemeSource`] - where palette batches come from (HTTP in production)
//! - [`ThemeFetcher`] - cache-first palette retrieval with file rotation
//! - [`apply_palette`] - distributes a palette over the settings color fields
//!
//! A generate action is `fetcher.fetch_mode(mode)` followed by
//! `apply_palette(settings, palette.as_deref())`.

pub mod applier;
pub mod fetcher;
pub mod source;

pub use applier::{apply_palette, apply_palette_with_rng};
pub use fetcher::{DEFAULT_THEME_FILE_COUNT, ThemeFetcher};
pub use source::{HttpThemeSource, ThemeBatch, ThemeEntry, ThemeSource, theme_path};
