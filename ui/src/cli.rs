use crate::editor::SettingsEditor;
use crate::error::{AppError, AppResult};
use clap::{Parser, Subcommand};
use engine::storage::LocalStorage;
use engine::{ColorField, Mode, Settings, ThemeFetcher};
use std::path::PathBuf;
use std::sync::Arc;

/// Edit color theme settings and generate palettes from the theme service
#[derive(Debug, Parser)]
#[command(name = "palette-studio", version, about)]
pub struct Cli {
    /// Path to config.toml (defaults to ~/.config/palette-studio/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the current settings as JSON
    Show,
    /// Apply a generated palette for a mode
    Generate {
        /// light or dark
        mode: Mode,
        /// Persist the result
        #[arg(long)]
        save: bool,
    },
    /// Set one of the named color fields
    Set {
        /// Field name, e.g. background or accentText
        field: ColorField,
        /// Color value, e.g. #1e1e2e
        value: String,
        #[arg(long)]
        save: bool,
    },
    /// Add a color to the accent list
    AddAccent {
        value: String,
        #[arg(long)]
        save: bool,
    },
    /// Remove a color from the accent list by position
    RemoveAccent {
        index: usize,
        #[arg(long)]
        save: bool,
    },
    /// Turn a feature flag on or off
    Flag {
        name: String,
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
        #[arg(long)]
        save: bool,
    },
    /// Set the backend URL (empty to clear)
    BackendUrl {
        url: String,
        #[arg(long)]
        save: bool,
    },
    /// Replace the settings with a JSON file
    Import {
        file: PathBuf,
        #[arg(long)]
        save: bool,
    },
    /// Write the saved settings to settings.json in a directory
    Export {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Restore the built-in defaults
    Reset {
        #[arg(long)]
        save: bool,
    },
    /// Write a default config.toml to the config directory
    InitConfig,
}

impl Command {
    fn save_requested(&self) -> bool {
        match self {
            Command::Generate { save, .. }
            | Command::Set { save, .. }
            | Command::AddAccent { save, .. }
            | Command::RemoveAccent { save, .. }
            | Command::Flag { save, .. }
            | Command::BackendUrl { save, .. }
            | Command::Import { save, .. }
            | Command::Reset { save } => *save,
            Command::Show | Command::Export { .. } | Command::InitConfig => false,
        }
    }

    /// Commands that overwrite the whole settings record, and so can run
    /// even when the stored value is unreadable.
    fn replaces_settings(&self) -> bool {
        matches!(self, Command::Reset { .. } | Command::Import { .. })
    }
}

/// Open the editing session `command` runs in.
///
/// `reset` and `import` start from defaults when the stored settings are
/// corrupt; every other command reports the corruption.
pub fn open_session(
    command: &Command,
    storage: LocalStorage,
    fetcher: Arc<ThemeFetcher>,
) -> AppResult<SettingsEditor> {
    if command.replaces_settings() {
        SettingsEditor::open_discarding_corrupt(storage, fetcher)
    } else {
        SettingsEditor::open(storage, fetcher)
    }
}

/// Run one editing command against an open session and close it.
///
/// Returns the settings in effect after the session: the edited ones when
/// the command asked to save, otherwise the ones that were persisted before.
/// [`Command::InitConfig`] does not touch settings and is handled by the binary.
pub async fn run(command: &Command, mut editor: SettingsEditor) -> AppResult<Settings> {
    match command {
        Command::Show => println!("{}", to_json(&editor.settings())?),
        Command::Generate { mode, .. } => {
            if !editor.generate(*mode).await {
                if let Some(error) = editor.last_error() {
                    return Err(error.clone());
                }
                println!("The theme service returned no {mode} palettes; settings unchanged.");
            }
            println!("{}", to_json(&editor.settings())?);
        }
        Command::Set { field, value, .. } => editor.set_color(*field, value)?,
        Command::AddAccent { value, .. } => editor.push_accent(value)?,
        Command::RemoveAccent { index, .. } => {
            let removed = editor.remove_accent(*index)?;
            println!("Removed accent {removed}");
        }
        Command::Flag { name, enabled, .. } => editor.set_feature_flag(name, *enabled)?,
        Command::BackendUrl { url, .. } => editor.set_backend_url(url)?,
        Command::Import { file, .. } => {
            editor.import_from(file).await?;
            println!("{}", to_json(&editor.settings())?);
        }
        Command::Export { dir } => {
            let path = editor.export_to(dir)?;
            println!("Exported settings to {}", path.display());
        }
        Command::Reset { .. } => editor.reset(),
        Command::InitConfig => {}
    }

    let save = command.save_requested();
    if !save && editor.is_dirty() {
        println!("Changes not saved; pass --save to keep them.");
    }
    editor.close(save)
}

fn to_json(settings: &Settings) -> AppResult<String> {
    serde_json::to_string_pretty(settings)
        .map_err(|e| AppError::State(format!("Failed to serialize settings: {e}")))
}
