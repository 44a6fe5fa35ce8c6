/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid request_timeout_secs: {configured} (min: {min_limit}, max: {max_limit})")]
    RequestTimeout {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid search_debounce_ms: {configured} (limit: {limit})")]
    SearchDebounce { configured: u64, limit: u64 },
    #[error("Invalid {key}: '{value}' is not an http(s) URL")]
    BaseUrl { key: &'static str, value: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::RequestTimeout {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Request timeout out of range!\n\n\
                    Your configured value: {configured} seconds\n\
                    Valid range: {min_limit} - {max_limit}\n\n\
                    Please update api.request_timeout_secs in config.toml."
                )
            }
            ConfigValidationError::SearchDebounce { configured, limit } => {
                format!(
                    "Search debounce too high!\n\n\
                    Your configured value: {configured} ms\n\
                    Maximum: {limit} ms\n\n\
                    Please update search_debounce_ms in config.toml."
                )
            }
            ConfigValidationError::BaseUrl { key, value } => {
                format!(
                    "Invalid service URL!\n\n\
                    {key} = '{value}'\n\n\
                    The URL must start with http:// or https://."
                )
            }
        }
    }
}

/// Outcome of loading the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration loading failed: {0}. Please check your config.toml file and environment variables.")]
    Load(String),
    #[error("Failed to deserialize config: {0}")]
    Deserialize(String),
    #[error("Configuration validation failed:\n{}", .0.iter().map(ConfigValidationError::user_message).collect::<Vec<_>>().join("\n\n"))]
    Invalid(Vec<ConfigValidationError>),
}
