use crate::store::StoreError;
use crate::transport::TransportError;
use thiserror::Error;

/// Errors surfaced by the auth and product services.
///
/// Every service operation resolves to one of these variants. Managers in the
/// application layer translate them into a single user-facing message; none
/// of them is fatal and none is retried automatically.
///
/// # Error Categories
///
/// - [`InvalidResponse`] - Non-2xx status, or a 2xx body that is not usable at all
/// - [`ServerError`] - The collaborator answered with a structured `error` message
/// - [`NetworkError`] - The transport itself failed (connectivity, timeout)
/// - [`DecodingError`] - The body did not match the expected shape
/// - [`ValidationError`] - Input rejected before any network call
/// - [`Storage`] - The local key-value store could not be read or written
///
/// # Examples
///
/// ```no_run
/// use services::ServiceError;
///
/// fn describe(error: &ServiceError) -> String {
///     match error {
///         ServiceError::ServerError(message) => message.clone(),
///         ServiceError::ValidationError { message, .. } => message.clone(),
///         other => other.to_string(),
///     }
/// }
/// ```
///
/// [`InvalidResponse`]: ServiceError::InvalidResponse
/// [`ServerError`]: ServiceError::ServerError
/// [`NetworkError`]: ServiceError::NetworkError
/// [`DecodingError`]: ServiceError::DecodingError
/// [`ValidationError`]: ServiceError::ValidationError
/// [`Storage`]: ServiceError::Storage
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// Unexpected status code or an unusable body.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Message supplied by the collaborator in its `error` field.
    #[error("{0}")]
    ServerError(String),

    /// Transport-level failure before a response was received.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    DecodingError(String),

    /// Client-side input rejected before any request was made.
    ///
    /// `field` names the rule category (`name`, `type`, `price`, `tax`,
    /// `email`, ...) so callers can attach the message to the right input.
    #[error("{message}")]
    ValidationError { field: String, message: String },

    /// Local persistence failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field name for validation failures, `None` for every other variant.
    pub fn field(&self) -> Option<&str> {
        match self {
            ServiceError::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<TransportError> for ServiceError {
    fn from(err: TransportError) -> Self {
        ServiceError::NetworkError(err.to_string())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::Storage(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_become_network_errors() {
        let err: ServiceError = TransportError::Timeout {
            url: "http://localhost/get".to_string(),
        }
        .into();
        assert!(matches!(err, ServiceError::NetworkError(_)));
    }

    #[test]
    fn validation_error_exposes_field() {
        let err = ServiceError::validation("price", "Please enter a valid price");
        assert_eq!(err.field(), Some("price"));
        assert_eq!(err.to_string(), "Please enter a valid price");
        assert_eq!(ServiceError::InvalidResponse("x".into()).field(), None);
    }
}
