use super::types::{
    AuthOutcome, LoginCredentials, RegistrationDetails, SessionToken, VerificationBody,
};
use crate::common::{ServiceError, ServiceResult};
use crate::store::{KeyValueStore, SESSION_TOKEN_KEY};
use crate::transport::{HttpRequest, HttpResponse, Transport};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Client for the auth collaborator.
///
/// Owns the session token: every successful exchange that returns a `token`
/// overwrites the stored value, [`logout`](Self::logout) clears it, and
/// [`is_authenticated`](Self::is_authenticated) only checks whether one is
/// stored. Tokens are never validated against the server.
///
/// # Examples
///
/// ```no_run
/// use services::auth::{AuthService, LoginCredentials};
/// use services::store::MemoryStore;
/// use services::transport::ReqwestTransport;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = Arc::new(ReqwestTransport::new(Duration::from_secs(30))?);
/// let auth = AuthService::new("http://127.0.0.1:3000/api/auth", transport, Arc::new(MemoryStore::new()));
///
/// auth.login(&LoginCredentials::new("me@example.com", "secret")).await?;
/// assert!(auth.is_authenticated());
/// # Ok(())
/// # }
/// ```
pub struct AuthService {
    base_url: String,
    transport: Arc<dyn Transport>,
    store: Arc<dyn KeyValueStore>,
}

impl AuthService {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            store,
        }
    }

    /// Creates an account. The collaborator normally answers with the
    /// `userId` to verify; a token, when present, is stored.
    pub async fn register(&self, details: &RegistrationDetails) -> ServiceResult<AuthOutcome> {
        require_present("email", &details.email)?;
        require_present("password", &details.password)?;
        require_present("name", &details.name)?;
        require_present("phone", &details.phone)?;

        log::info!("Attempting registration");
        self.exchange("register", details).await
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> ServiceResult<AuthOutcome> {
        require_present("identifier", &credentials.identifier)?;
        require_present("password", &credentials.password)?;

        log::info!("Attempting login");
        self.exchange("login", credentials).await
    }

    /// Confirms a registration with the emailed code.
    pub async fn verify(&self, user_id: &str, code: &str) -> ServiceResult<AuthOutcome> {
        require_present("userId", user_id)?;
        require_present("code", code)?;

        log::info!("Attempting verification for user {user_id}");
        self.exchange("verify", &VerificationBody { user_id, code })
            .await
    }

    /// Clears the stored token. Safe to call when signed out.
    pub fn logout(&self) -> ServiceResult<()> {
        log::info!("Signing out, removing stored token");
        self.store.remove(SESSION_TOKEN_KEY)?;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }

    pub fn current_token(&self) -> Option<SessionToken> {
        match self.store.get_string(SESSION_TOKEN_KEY) {
            Ok(token) => token.and_then(SessionToken::new),
            Err(e) => {
                log::error!("Failed to read session token: {e}");
                None
            }
        }
    }

    async fn exchange<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> ServiceResult<AuthOutcome> {
        let url = format!("{}/{endpoint}", self.base_url);
        let request = HttpRequest::post_json(url, payload)?;
        let response = self.transport.send(request).await?;

        log::debug!("Auth {endpoint} responded with status {}", response.status);

        let outcome = parse_auth_response(&response)?;
        if let Some(token) = &outcome.token {
            self.store.set_string(SESSION_TOKEN_KEY, token.as_str())?;
            log::info!("Session token received and saved");
        }
        Ok(outcome)
    }
}

fn require_present(field: &str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(field, format!("{field} is required")));
    }
    Ok(())
}

fn parse_auth_response(response: &HttpResponse) -> ServiceResult<AuthOutcome> {
    let body = serde_json::from_slice::<Value>(&response.body).ok();

    if !response.is_success() {
        let server_message = body
            .as_ref()
            .and_then(|json| json.get("error"))
            .and_then(Value::as_str);
        return Err(match server_message {
            Some(message) => {
                log::warn!("Server rejected auth request: {message}");
                ServiceError::ServerError(message.to_string())
            }
            None => ServiceError::InvalidResponse(format!("unexpected status {}", response.status)),
        });
    }

    let Some(Value::Object(json)) = body else {
        return Err(ServiceError::InvalidResponse(
            "expected a JSON object body".to_string(),
        ));
    };

    Ok(AuthOutcome {
        token: json
            .get("token")
            .and_then(Value::as_str)
            .and_then(SessionToken::new),
        user_id: user_id_of(&json),
        message: json
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

// `userId` arrives as a string or a number depending on the backend.
fn user_id_of(json: &Map<String, Value>) -> Option<String> {
    match json.get("userId").or_else(|| json.get("user_id"))? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_becomes_server_error() {
        let response = HttpResponse::new(401, r#"{"error":"Invalid credentials"}"#);
        assert_eq!(
            parse_auth_response(&response),
            Err(ServiceError::ServerError("Invalid credentials".to_string()))
        );
    }

    #[test]
    fn non_success_without_error_is_invalid_response() {
        let response = HttpResponse::new(500, "<html>oops</html>");
        assert!(matches!(
            parse_auth_response(&response),
            Err(ServiceError::InvalidResponse(_))
        ));
    }

    #[test]
    fn success_with_unparsable_body_is_invalid_response() {
        let response = HttpResponse::new(200, "ok");
        assert!(matches!(
            parse_auth_response(&response),
            Err(ServiceError::InvalidResponse(_))
        ));
    }

    #[test]
    fn numeric_user_id_is_accepted() {
        let response = HttpResponse::new(201, r#"{"message":"Check your email","userId":17}"#);
        let outcome = parse_auth_response(&response).unwrap();
        assert_eq!(outcome.user_id.as_deref(), Some("17"));
        assert_eq!(outcome.message.as_deref(), Some("Check your email"));
        assert!(outcome.token.is_none());
    }
}
