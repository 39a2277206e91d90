use anyhow::{Context, bail};
use clap::Parser;
use engine::storage::LocalStorage;
use engine::theme::HttpThemeSource;
use engine::{PaletteCache, ThemeFetcher};
use std::sync::Arc;
use studio::cli::{self, Cli, Command};
use studio::config::{self, ConfigLoadResult, setup};
use studio::logger::setup_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::InitConfig = cli.command {
        let config_dir = setup::get_config_dir()?;
        let (path, created) = setup::initialize_config_dir(&config_dir)?;
        if created {
            println!("Wrote default config to {}", path.display());
        } else {
            println!("Config already exists at {}", path.display());
        }
        return Ok(());
    }

    let app_config = match config::load_config(cli.config.as_deref()) {
        ConfigLoadResult::Success(config) => config,
        ConfigLoadResult::LoadError(message) | ConfigLoadResult::DeserializeError(message) => {
            bail!(message)
        }
    };

    setup_logger(app_config.logging()).context("Failed to initialize logger")?;
    log::info!("Starting palette-studio");

    let source = HttpThemeSource::new(
        app_config.theme_service_url(),
        app_config.request_timeout(),
    )?;
    let fetcher = Arc::new(
        ThemeFetcher::new(Arc::new(source), Arc::new(PaletteCache::new()))
            .with_file_count(app_config.theme_file_count()),
    );

    let storage = LocalStorage::new(app_config.storage_dir());
    let editor = cli::open_session(&cli.command, storage, fetcher)?;

    match cli::run(&cli.command, editor).await {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("{e}");
            bail!(e.user_message())
        }
    }
}
