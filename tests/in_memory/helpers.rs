//! Shared test helpers for in-memory integration tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::Arc;
use taskboard::task::{
    adapters::memory::InMemoryKeyValueStore, domain::OwnerId, services::TaskStore,
};

/// Clock pinned to 2026-06-01T12:00:00Z.
#[derive(Debug, Clone, Copy)]
pub struct PinnedClock(pub DateTime<Utc>);

impl Clock for PinnedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Store type used by the in-memory integration tests.
pub type TestStore = TaskStore<InMemoryKeyValueStore, PinnedClock>;

/// Provides the pinned clock.
#[fixture]
pub fn clock() -> PinnedClock {
    PinnedClock(
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    )
}

/// Provides a fresh shared in-memory storage backend.
#[fixture]
pub fn storage() -> InMemoryKeyValueStore {
    InMemoryKeyValueStore::new()
}

/// Parses an owner identifier.
///
/// # Panics
///
/// Panics if `raw` is blank.
#[must_use]
pub fn owner(raw: &str) -> OwnerId {
    OwnerId::new(raw).expect("valid owner id")
}

/// Builds a store over `storage` that is not yet signed in.
#[must_use]
pub fn store_over(storage: &InMemoryKeyValueStore, clock: PinnedClock) -> TestStore {
    TaskStore::new(Arc::new(storage.clone()), Arc::new(clock))
}
