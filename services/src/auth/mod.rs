pub mod auth_service;
pub mod types;

pub use auth_service::AuthService;
pub use types::{AuthOutcome, LoginCredentials, RegistrationDetails, SessionToken};
