use crate::app::msg::{AuthActivityMsg, Msg};
use crate::app::notify;
use services::ServiceResult;
use services::auth::{AuthOutcome, AuthService, LoginCredentials, RegistrationDetails};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use tokio::sync::watch;

/// Owns the single observable authentication flag.
///
/// The flag starts from [`AuthService::is_authenticated`] and is then only
/// changed by this manager. Overlapping calls are not coordinated: whichever
/// finishes last decides the value.
pub struct SessionManager {
    auth: Arc<AuthService>,
    authenticated: watch::Sender<bool>,
    tx: Sender<Msg>,
}

impl SessionManager {
    pub fn new(auth: Arc<AuthService>, tx: Sender<Msg>) -> Self {
        let (authenticated, _) = watch::channel(auth.is_authenticated());
        Self {
            auth,
            authenticated,
            tx,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    /// Receiver that observes every change of the flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    /// Logs in. Errors come back exactly as the auth service produced them and
    /// leave the flag untouched.
    pub async fn sign_in(&self, credentials: &LoginCredentials) -> ServiceResult<AuthOutcome> {
        match self.auth.login(credentials).await {
            Ok(outcome) => {
                self.set_authenticated(true);
                Ok(outcome)
            }
            Err(e) => Err(self.report_failure(e)),
        }
    }

    /// Registers an account. The session only starts here when the server
    /// already issued a token; otherwise a verification is pending.
    pub async fn register(&self, details: &RegistrationDetails) -> ServiceResult<AuthOutcome> {
        match self.auth.register(details).await {
            Ok(outcome) => {
                if outcome.token.is_some() {
                    self.set_authenticated(true);
                } else {
                    notify(
                        &self.tx,
                        Msg::AuthActivity(AuthActivityMsg::VerificationRequired {
                            user_id: outcome.user_id.clone(),
                            message: outcome.message.clone(),
                        }),
                    );
                }
                Ok(outcome)
            }
            Err(e) => Err(self.report_failure(e)),
        }
    }

    /// Confirms a registration code; success starts the session.
    pub async fn verify(&self, user_id: &str, code: &str) -> ServiceResult<AuthOutcome> {
        match self.auth.verify(user_id, code).await {
            Ok(outcome) => {
                self.set_authenticated(true);
                Ok(outcome)
            }
            Err(e) => Err(self.report_failure(e)),
        }
    }

    /// Clears the session. The flag is reset even when the store could not be
    /// written; that failure is still returned.
    pub fn sign_out(&self) -> ServiceResult<()> {
        let result = self.auth.logout();
        self.set_authenticated(false);
        result
    }

    fn set_authenticated(&self, value: bool) {
        self.authenticated.send_replace(value);
        log::info!("Authentication state set to {value}");
        notify(
            &self.tx,
            Msg::AuthActivity(AuthActivityMsg::AuthenticationChanged(value)),
        );
    }

    fn report_failure(&self, error: services::ServiceError) -> services::ServiceError {
        log::warn!("Authentication request failed: {error}");
        notify(
            &self.tx,
            Msg::AuthActivity(AuthActivityMsg::AuthenticationFailed(error.to_string())),
        );
        error
    }
}
