use serde::Serialize;
use std::fmt;

/// Opaque credential proving an authenticated identity.
///
/// `Debug` and `Display` never print the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps `token`, rejecting empty or whitespace-only values.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Payload for `POST /register`.
#[derive(Clone, PartialEq, Serialize)]
pub struct RegistrationDetails {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: String,
}

impl RegistrationDetails {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
            phone: phone.into(),
        }
    }
}

impl fmt::Debug for RegistrationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDetails")
            .field("email", &self.email)
            .field("password", &"***")
            .field("name", &self.name)
            .field("phone", &self.phone)
            .finish()
    }
}

/// Payload for `POST /login`. `identifier` is an email address or phone number.
#[derive(Clone, PartialEq, Serialize)]
pub struct LoginCredentials {
    pub identifier: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("identifier", &self.identifier)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Serialize)]
pub(crate) struct VerificationBody<'a> {
    #[serde(rename = "userId")]
    pub user_id: &'a str,
    pub code: &'a str,
}

/// What a successful auth exchange produced.
///
/// Registration usually answers without a token and with the `userId` to
/// verify; login and verification answer with a token.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthOutcome {
    pub token: Option<SessionToken>,
    pub user_id: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tokens_are_rejected() {
        assert!(SessionToken::new("").is_none());
        assert!(SessionToken::new("   ").is_none());
        assert_eq!(SessionToken::new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn secrets_are_not_printed() {
        let credentials = LoginCredentials::new("me@example.com", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("me@example.com"));
        assert!(!debug.contains("hunter2"));

        let token = SessionToken::new("secret-token").unwrap();
        assert!(!format!("{token:?} {token}").contains("secret-token"));
    }

    #[test]
    fn verification_body_uses_camel_case_user_id() {
        let body = VerificationBody {
            user_id: "42",
            code: "123456",
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, serde_json::json!({"userId": "42", "code": "123456"}));
    }
}
