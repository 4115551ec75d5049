//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by the task store.

pub mod identity;
pub mod storage;

pub use identity::IdentityProvider;
pub use storage::{KeyValueStore, StorageError, StorageKey, StorageResult};
