//! # Palette Engine
//!
//! Core library behind Palette Studio. It owns everything that is not form
//! plumbing: the settings model, the palette prefetch cache, the remote theme
//! fetcher, palette application, the observable settings store and the
//! on-disk key-value storage used for persistence, import and export.
//!
//! ## Modules
//!
//! - [`common`] - Error types shared across the engine
//! - [`palette`] - Theme modes, palettes and the per-mode palette cache
//! - [`settings`] - The settings record and its color fields
//! - [`shuffle`] - Unbiased in-place shuffling
//! - [`storage`] - Local key-value storage, load/save, import and export
//! - [`store`] - Observable settings container
//! - [`theme`] - Remote theme source, fetcher and palette applier

pub mod common;
pub mod palette;
pub mod settings;
pub mod shuffle;
pub mod storage;
pub mod store;
pub mod theme;

pub use palette::{Mode, Palette, PaletteCache};
pub use settings::{Color, ColorField, Settings};
pub use store::{SettingsStore, SubscriptionId};
pub use theme::{ThemeFetcher, apply_palette};
