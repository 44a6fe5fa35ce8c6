//! # Catalog Services Library
//!
//! Core library for talking to the catalog's auth and product collaborators.
//! Services are constructed explicitly with a [`transport::Transport`] and a
//! [`store::KeyValueStore`] so callers (and tests) decide what sits behind them.
//!
//! ## Modules
//!
//! - [`auth`] - Registration, login, verification and session token storage
//! - [`products`] - Product listing and multipart product creation
//! - [`model`] - Product and creation payload models
//! - [`transport`] - HTTP transport seam and the reqwest-backed implementation
//! - [`store`] - Key-value persistence for the session token and favorites
//! - [`debounce`] - Cancel-and-replace scheduling for delayed work
//! - [`common`] - Error types shared by all services

pub mod auth;
pub mod common;
pub mod debounce;
pub mod model;
pub mod products;
pub mod store;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use common::errors::{ServiceError, ServiceResult};
