use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub mod app;
pub mod limits;
pub mod validation;

pub use app::{ApiConfig, AppConfig, StorageConfig};
pub use validation::{ConfigLoadError, ConfigValidationError};

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads the configuration.
///
/// Sources, later ones overriding earlier ones:
/// 1. `config_path` when given (must exist), otherwise `./config.toml` if present
/// 2. Environment variables, `__` separating sections (`API__AUTH_BASE_URL`)
///
/// A `.env` file in the working directory is loaded first.
pub fn load_config(config_path: Option<&Path>) -> Result<AppConfig, ConfigLoadError> {
    dotenv::dotenv().ok();

    let file_source = match config_path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };
    let env_source = Environment::default().separator("__");

    let config = Config::builder()
        .add_source(file_source)
        .add_source(env_source) // environment entries still override file values when present
        .build()
        .map_err(|e| ConfigLoadError::Load(e.to_string()))?;

    let app_config = config
        .try_deserialize::<AppConfig>()
        .map_err(|e| ConfigLoadError::Deserialize(e.to_string()))?;

    app_config.validate().map_err(ConfigLoadError::Invalid)?;

    log::debug!("Configuration loaded");
    Ok(app_config)
}

/// Additional logging configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
