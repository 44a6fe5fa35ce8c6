//! Key-value persistence for the session token and per-product favorite flags.
//!
//! The store is synchronous and treated as always available. Writes return a
//! [`Result`] so callers can at least log a failed write.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Key under which the session token is stored.
pub const SESSION_TOKEN_KEY: &str = "auth_token";

/// Prefix for per-product favorite flags.
pub const FAVORITE_KEY_PREFIX: &str = "favorite_";

/// Storage key for the favorite flag of `product_id`.
pub fn favorite_key(product_id: i64) -> String {
    format!("{FAVORITE_KEY_PREFIX}{product_id}")
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access store file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to (de)serialize store contents: {0}")]
    Serialization(String),
    #[error("Store lock poisoned")]
    Poisoned,
    #[error("Failed to determine store directory: {0}")]
    Location(String),
}

/// A single stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Bool(bool),
    Text(String),
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError>;

    /// Writes `value` under `key`, overwriting any prior value.
    fn set(&self, key: &str, value: StoredValue) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(match self.get(key)? {
            Some(StoredValue::Text(text)) => Some(text),
            _ => None,
        })
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set(key, StoredValue::Text(value.to_string()))
    }

    /// Missing or non-boolean entries read as `false`.
    fn get_bool(&self, key: &str) -> Result<bool, StoreError> {
        Ok(matches!(self.get(key)?, Some(StoredValue::Bool(true))))
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.set(key, StoredValue::Bool(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favorite_keys_are_prefixed_by_id() {
        assert_eq!(favorite_key(1), "favorite_1");
        assert_eq!(favorite_key(42), "favorite_42");
    }

    #[test]
    fn typed_accessors_ignore_mismatched_values() {
        let store = MemoryStore::new();
        store.set_string("favorite_1", "yes").unwrap();
        assert!(!store.get_bool("favorite_1").unwrap());

        store.set_bool(SESSION_TOKEN_KEY, true).unwrap();
        assert_eq!(store.get_string(SESSION_TOKEN_KEY).unwrap(), None);
    }
}
