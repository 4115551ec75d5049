//! In-memory key/value store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::ports::{KeyValueStore, StorageError, StorageKey, StorageResult};

/// Thread-safe in-memory key/value store.
///
/// Clones share the same underlying map, so a clone handed to a task store
/// can be inspected by the caller afterwards.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> StorageError {
    StorageError::backend(std::io::Error::other(err.to_string()))
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &StorageKey) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key.as_str()).cloned())
    }

    fn set(&self, key: &StorageKey, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.as_str().to_owned(), value.to_owned());
        Ok(())
    }
}
