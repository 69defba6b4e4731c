pub mod browse;
pub mod config;
pub mod details;
pub mod loading_ui;
pub mod prompts;
pub mod render;
pub mod search;

use color_eyre::Result;
use popcorn_config::{Config, PathManager};
use popcorn_core::{AppState, Session};
use popcorn_sources::OmdbClient;
use std::sync::Arc;

/// Load and validate the config, then build a session against OMDb
pub fn open_session() -> Result<(Config, Session)> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    let config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;
    config.validate().map_err(|e| {
        color_eyre::eyre::eyre!("{}. Run 'popcorn config set-key' to configure the catalog.", e)
    })?;

    let client = Arc::new(
        OmdbClient::from_config(&config.catalog)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to set up the catalog client: {}", e))?,
    );
    tracing::debug!(base_url = %client.base_url(), "Catalog client ready");
    let session = Session::new(client, AppState::from_config(&config));
    Ok((config, session))
}
