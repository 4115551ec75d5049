//! Durable keyed string storage port.

use crate::task::domain::OwnerId;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Key under which one owner's serialised task collection is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Prefix shared by every task collection key.
    pub const PREFIX: &'static str = "tasks-";

    /// Derives the key for `owner`'s collection (`tasks-{owner}`).
    #[must_use]
    pub fn for_owner(owner: &OwnerId) -> Self {
        Self(format!("{}{owner}", Self::PREFIX))
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Synchronous string-valued key/value store.
///
/// A successful [`KeyValueStore::set`] must be visible to every subsequent
/// [`KeyValueStore::get`] on the same store.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when nothing has been stored for the key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be read.
    fn get(&self, key: &StorageKey) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the value could not be written. The
    /// previous value must then still be in place.
    fn set(&self, key: &StorageKey, value: &str) -> StorageResult<()>;
}

/// Errors returned by storage implementations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The key cannot be represented by this backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Backend failure.
    #[error("storage backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
