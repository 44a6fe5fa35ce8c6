use services::ServiceError;
use thiserror::Error;

/// Application-wide error type for the catalog client.
///
/// Service errors pass through unchanged in [`AppError::Service`]; the other
/// variants cover what only the application layer can get wrong.
/// [`AppError::user_message`] turns any of them into the single string shown
/// to the user.
///
/// # Examples
///
/// ```no_run
/// use catalog::error::AppError;
/// use services::ServiceError;
///
/// let error = AppError::from(ServiceError::ServerError("Invalid credentials".into()));
/// assert_eq!(error.user_message(), "Invalid credentials");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Failure reported by the auth or products services
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system errors outside the store (reading an image, opening a log file)
    #[error("I/O error: {0}")]
    Io(String),

    /// Operation requires a signed-in session
    #[error("Authentication required: {0}")]
    Auth(String),
}

impl AppError {
    /// Message suitable for direct display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Service(ServiceError::NetworkError(_)) => {
                "Unable to reach the server. Please check your connection and try again."
                    .to_string()
            }
            AppError::Service(ServiceError::InvalidResponse(_)) => {
                "The server returned an unexpected response. Please try again later.".to_string()
            }
            AppError::Service(ServiceError::DecodingError(_)) => {
                "The server response could not be read. Please try again later.".to_string()
            }
            AppError::Service(other) => other.to_string(),
            AppError::Auth(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_and_validation_messages_pass_through() {
        let server = AppError::from(ServiceError::ServerError("Email already in use".into()));
        assert_eq!(server.user_message(), "Email already in use");

        let validation = AppError::from(ServiceError::validation("tax", "Please enter a valid tax rate (0-100)"));
        assert_eq!(validation.user_message(), "Please enter a valid tax rate (0-100)");
    }

    #[test]
    fn transport_failures_get_a_friendly_message() {
        let error = AppError::from(ServiceError::NetworkError("connection refused".into()));
        assert!(error.user_message().contains("Unable to reach the server"));
    }
}
