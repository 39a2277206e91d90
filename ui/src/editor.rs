//! # Settings Editor
//!
//! Headless editing session behind the settings form. Every form control
//! maps to one method here; the editor validates the input, writes it
//! through the [`SettingsStore`] (so subscribed views re-render) and keeps a
//! pristine copy taken when the session opened so a cancel can undo
//! everything.
//!
//! ## Actions
//!
//! - [`generate`](SettingsEditor::generate) - fetch a palette for a mode and apply it
//! - [`import_from`](SettingsEditor::import_from) - replace the settings with a JSON file
//! - [`export_to`](SettingsEditor::export_to) - write the *saved* settings to a file
//! - [`reset`](SettingsEditor::reset) - go back to the built-in defaults
//! - [`save`](SettingsEditor::save) - persist the edited settings
//! - [`close`](SettingsEditor::close) - end the session, saving or discarding
//!
//! The failure of an action is kept in [`last_error`](SettingsEditor::last_error)
//! until the next action starts; [`error_message`](SettingsEditor::error_message)
//! is its user-facing text.

use crate::error::{AppError, AppResult};
use crate::validation::{BackendUrlValidator, ColorValidator, FlagNameValidator, Validator};
use engine::common::StorageError;
use engine::storage::{self, LocalStorage};
use engine::{
    Color, ColorField, Mode, Settings, SettingsStore, SubscriptionId, ThemeFetcher, apply_palette,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct SettingsEditor {
    store: SettingsStore,
    pristine: Settings,
    storage: LocalStorage,
    fetcher: Arc<ThemeFetcher>,
    last_error: Option<AppError>,
}

impl SettingsEditor {
    /// Start a session on the settings persisted in `storage`.
    pub fn open(storage: LocalStorage, fetcher: Arc<ThemeFetcher>) -> AppResult<Self> {
        let settings = storage::load_settings(&storage)?;
        Ok(Self::start(storage, fetcher, settings))
    }

    /// Like [`open`](Self::open), but a stored value that no longer parses is
    /// replaced by the defaults for this session. The file on disk is only
    /// overwritten when the session is saved.
    pub fn open_discarding_corrupt(
        storage: LocalStorage,
        fetcher: Arc<ThemeFetcher>,
    ) -> AppResult<Self> {
        let settings = match storage::load_settings(&storage) {
            Ok(settings) => settings,
            Err(e @ StorageError::Corrupt { .. }) => {
                log::warn!("{e}; starting from default settings");
                Settings::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self::start(storage, fetcher, settings))
    }

    fn start(storage: LocalStorage, fetcher: Arc<ThemeFetcher>, settings: Settings) -> Self {
        log::info!("Opened settings editor on {}", storage.root().display());

        Self {
            store: SettingsStore::new(settings.clone()),
            pristine: settings,
            storage,
            fetcher,
            last_error: None,
        }
    }

    pub fn settings(&self) -> Settings {
        self.store.get()
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&Settings) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.last_error.as_ref().map(AppError::user_message)
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn is_loading(&self, mode: Mode) -> bool {
        self.fetcher.is_loading(mode)
    }

    /// Whether the edited settings differ from the ones the session started with.
    pub fn is_dirty(&self) -> bool {
        self.store.with(|settings| *settings != self.pristine)
    }

    fn record_error(&mut self, error: &AppError) {
        log::error!("{error}");
        self.last_error = Some(error.clone());
    }

    // === Form bindings ===

    pub fn set_color(&mut self, field: ColorField, value: &str) -> AppResult<()> {
        ColorValidator.validate(value)?;
        self.store
            .update(|settings| settings.set_color(field, Color::from(value)));
        Ok(())
    }

    pub fn set_accent(&mut self, index: usize, value: &str) -> AppResult<()> {
        ColorValidator.validate(value)?;
        let len = self.store.with(|settings| settings.accent_colors.len());
        if index >= len {
            return Err(AppError::State(format!(
                "Accent color {index} does not exist (there are {len})"
            )));
        }
        self.store
            .update(|settings| settings.accent_colors[index] = Color::from(value));
        Ok(())
    }

    pub fn push_accent(&mut self, value: &str) -> AppResult<()> {
        ColorValidator.validate(value)?;
        self.store
            .update(|settings| settings.accent_colors.push(Color::from(value)));
        Ok(())
    }

    pub fn remove_accent(&mut self, index: usize) -> AppResult<Color> {
        let len = self.store.with(|settings| settings.accent_colors.len());
        if index >= len {
            return Err(AppError::State(format!(
                "Accent color {index} does not exist (there are {len})"
            )));
        }
        Ok(self
            .store
            .update(|settings| settings.accent_colors.remove(index)))
    }

    pub fn set_feature_flag(&mut self, name: &str, enabled: bool) -> AppResult<()> {
        FlagNameValidator.validate(name)?;
        self.store.update(|settings| {
            settings.feature_flags.insert(name.to_string(), enabled);
        });
        Ok(())
    }

    pub fn set_backend_url(&mut self, url: &str) -> AppResult<()> {
        let url = url.trim();
        BackendUrlValidator.validate(url)?;
        self.store
            .update(|settings| settings.backend_url = url.to_string());
        Ok(())
    }

    // === Actions ===

    /// Fetch a palette for `mode` and distribute it over the color fields.
    ///
    /// Returns `true` when the settings changed. A failed fetch is reported
    /// through [`error_message`](Self::error_message) and leaves the settings
    /// untouched.
    pub async fn generate(&mut self, mode: Mode) -> bool {
        self.clear_error();

        match self.fetcher.fetch_mode(mode).await {
            Ok(palette) => {
                let applied = self
                    .store
                    .update(|settings| apply_palette(settings, palette.as_deref()));
                if applied {
                    log::info!("Applied generated {mode} palette");
                } else {
                    log::warn!("Theme service returned no {mode} palettes");
                }
                applied
            }
            Err(e) => {
                self.record_error(&AppError::from(e));
                false
            }
        }
    }

    /// Replace the edited settings with the contents of a JSON file.
    ///
    /// On failure the current settings are kept and the error is both
    /// returned and recorded for display.
    pub async fn import_from(&mut self, path: &Path) -> AppResult<()> {
        self.clear_error();

        match storage::import_settings(path).await {
            Ok(settings) => {
                self.store.set(settings);
                Ok(())
            }
            Err(e) => {
                let error = AppError::from(e);
                self.record_error(&error);
                Err(error)
            }
        }
    }

    /// Export the persisted settings into `dir`. Unsaved edits are not included.
    pub fn export_to(&mut self, dir: &Path) -> AppResult<PathBuf> {
        self.clear_error();

        storage::export_settings(&self.storage, dir)
            .map_err(AppError::from)
            .inspect_err(|error| self.record_error(error))
    }

    /// Replace the edited settings with the built-in defaults.
    pub fn reset(&mut self) {
        self.store.set(Settings::default());
        log::info!("Settings reset to defaults");
    }

    /// Persist the edited settings; they become the new baseline for `close`.
    pub fn save(&mut self) -> AppResult<()> {
        self.clear_error();

        let settings = self.store.get();
        if let Err(e) = storage::save_settings(&self.storage, &settings) {
            let error = AppError::from(e);
            self.record_error(&error);
            return Err(error);
        }
        self.pristine = settings;
        Ok(())
    }

    /// End the session and return the settings that are now in effect.
    ///
    /// Without `save`, any edits since the last save are discarded and
    /// subscribers see the pristine settings again.
    pub fn close(mut self, save: bool) -> AppResult<Settings> {
        if save {
            self.save()?;
        } else if self.is_dirty() {
            log::info!("Discarding unsaved settings changes");
            let pristine = self.pristine.clone();
            self.store.set(pristine);
        }
        Ok(self.pristine)
    }
}
