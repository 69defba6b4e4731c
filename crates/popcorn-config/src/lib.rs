pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, SearchConfig, UiConfig, API_KEY_ENV, API_KEY_PLACEHOLDER};
pub use paths::{PathManager, base_path_override};
