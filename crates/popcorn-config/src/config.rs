use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Environment variable that overrides `catalog.api_key`
pub const API_KEY_ENV: &str = "POPCORN_OMDB_API_KEY";
pub const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Queries shorter than this never reach the catalog
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,
    #[serde(default = "default_initial_query")]
    pub initial_query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_page_title")]
    pub default_page_title: String,
}

fn default_base_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_min_query_length() -> usize {
    3
}

fn default_initial_query() -> String {
    "inception".to_string()
}

fn default_page_title() -> String {
    "usePopcorn".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: API_KEY_PLACEHOLDER.to_string(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_length: default_min_query_length(),
            initial_query: default_initial_query(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_page_title: default_page_title(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            search: SearchConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the config file if present, otherwise start from defaults, then
    /// apply the API key environment override.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            debug!(path = %path.display(), "Loading config file");
            Self::load_from_file(path)?
        } else {
            debug!(path = %path.display(), "Config file not found, using defaults");
            Self::default()
        };
        config.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    pub fn apply_api_key_override(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            debug!("Using catalog API key from {}", API_KEY_ENV);
            self.catalog.api_key = key.trim().to_string();
        }
    }

    pub fn is_catalog_configured(&self) -> bool {
        let key = self.catalog.api_key.trim();
        !key.is_empty() && key != API_KEY_PLACEHOLDER
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.is_catalog_configured() {
            return Err(anyhow::anyhow!(
                "catalog.api_key is not configured (set it in config.toml or {})",
                API_KEY_ENV
            ));
        }
        if self.catalog.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("catalog.base_url cannot be empty"));
        }
        if self.catalog.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("catalog.timeout_seconds must be greater than zero"));
        }
        if self.search.min_query_length == 0 {
            return Err(anyhow::anyhow!("search.min_query_length must be at least 1"));
        }
        Ok(())
    }
}
