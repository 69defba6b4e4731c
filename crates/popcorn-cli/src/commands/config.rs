use super::prompts::prompt_password;
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use popcorn_config::{Config, PathManager, API_KEY_ENV, API_KEY_PLACEHOLDER};
use serde_json::json;

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output),
        crate::ConfigCommands::Init { force } => init_config(force, output),
        crate::ConfigCommands::SetKey { key } => set_api_key(key, output),
    }
}

fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })
}

fn save_config(config: &Config, path_manager: &PathManager) -> Result<()> {
    let config_file = path_manager.config_file();
    config.save_to_file(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e)
    })
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = load_config(&path_manager)?;
    let api_key = if full {
        config.catalog.api_key.clone()
    } else {
        mask_string(&config.catalog.api_key)
    };

    if !output.is_human() {
        output.json(&json!({
            "type": "config",
            "file": config_file.display().to_string(),
            "exists": config_file.exists(),
            "catalog": {
                "api_key": api_key,
                "base_url": config.catalog.base_url,
                "timeout_seconds": config.catalog.timeout_seconds,
            },
            "search": {
                "min_query_length": config.search.min_query_length,
                "initial_query": config.search.initial_query,
            },
            "ui": { "default_page_title": config.ui.default_page_title },
        }));
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!(
            "No config file at {}, showing defaults",
            config_file.display()
        ));
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(config_file.display().to_string()).add_attribute(Attribute::Bold),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    let rows = [
        ("catalog.api_key", api_key),
        ("catalog.base_url", config.catalog.base_url.clone()),
        ("catalog.timeout_seconds", config.catalog.timeout_seconds.to_string()),
        ("search.min_query_length", config.search.min_query_length.to_string()),
        ("search.initial_query", config.search.initial_query.clone()),
        ("ui.default_page_title", config.ui.default_page_title.clone()),
    ];
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    output.println(table.to_string());

    if let Err(e) = config.validate() {
        output.warn(e.to_string());
    }
    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Config already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(());
    }

    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create config directory: {}", e))?;
    save_config(&Config::default(), &path_manager)?;
    output.success(format!("Wrote default config to {}", config_file.display()));
    output.info(format!(
        "Set your OMDb API key with 'popcorn config set-key' or the {} environment variable",
        API_KEY_ENV
    ));
    Ok(())
}

fn set_api_key(key: Option<String>, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => prompt_password("OMDb API key")?,
    };
    let key = key.trim().to_string();
    if key.is_empty() || key == API_KEY_PLACEHOLDER {
        return Err(color_eyre::eyre::eyre!("API key cannot be empty"));
    }

    let path_manager = PathManager::default();
    // Read the file directly so an environment override is not written back
    let config_file = path_manager.config_file();
    let mut config = if config_file.exists() {
        Config::load_from_file(&config_file).map_err(|e| {
            color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
        })?
    } else {
        Config::default()
    };
    config.catalog.api_key = key;
    save_config(&config, &path_manager)?;
    output.success(format!("Saved API key to {}", config_file.display()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() || s == API_KEY_PLACEHOLDER {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
