//! # Catalog Client Library
//!
//! Application layer of the catalog client: configuration, logging, the
//! state managers a front end drives, and the command-line front end itself.
//!
//! ## Modules
//!
//! - [`app`] - Managers (session, product list, product form), events and wiring
//! - [`cli`] - Command-line interface definition and command execution
//! - [`config`] - Configuration loading and validation
//! - [`constants`] - Environment variable names and shared constants
//! - [`error`] - Application error type and user-facing messages
//! - [`logger`] - Logging setup
//! - [`validation`] - Input validators for the product form
//!
//! This library interface enables integration testing by providing access to internal modules.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod validation;

pub use app::msg::Msg;
pub use error::{AppError, AppResult};
pub use validation::Validator;
