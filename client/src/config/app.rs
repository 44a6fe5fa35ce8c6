use super::LoggingConfig;
use super::limits::*;
use super::validation::ConfigValidationError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    search_debounce_ms: Option<u64>,
    #[serde(default)]
    api: ApiConfig,
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

/// Collaborator endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    auth_base_url: Option<String>,
    products_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Local persistence
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    path: Option<String>,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let timeout = self.api.request_timeout_secs();
        if !(MIN_REQUEST_TIMEOUT_SECS..=MAX_REQUEST_TIMEOUT_SECS).contains(&timeout) {
            errors.push(ConfigValidationError::RequestTimeout {
                configured: timeout,
                min_limit: MIN_REQUEST_TIMEOUT_SECS,
                max_limit: MAX_REQUEST_TIMEOUT_SECS,
            });
        }

        let debounce = self.search_debounce_ms.unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS);
        if debounce > MAX_SEARCH_DEBOUNCE_MS {
            errors.push(ConfigValidationError::SearchDebounce {
                configured: debounce,
                limit: MAX_SEARCH_DEBOUNCE_MS,
            });
        }

        for (key, value) in [
            ("api.auth_base_url", self.api.auth_base_url()),
            ("api.products_base_url", self.api.products_base_url()),
        ] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                errors.push(ConfigValidationError::BaseUrl {
                    key,
                    value: value.to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms.unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS))
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

impl ApiConfig {
    pub fn auth_base_url(&self) -> &str {
        self.auth_base_url.as_deref().unwrap_or(DEFAULT_AUTH_BASE_URL)
    }

    pub fn products_base_url(&self) -> &str {
        self.products_base_url
            .as_deref()
            .unwrap_or(DEFAULT_PRODUCTS_BASE_URL)
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs())
    }
}

impl StorageConfig {
    /// Configured store file, `None` to use the platform default.
    pub fn path(&self) -> Option<PathBuf> {
        self.path.as_ref().map(PathBuf::from)
    }
}
