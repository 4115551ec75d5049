//! Seams between the board views and the task store.

use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::KeyValueStore,
    services::{TaskStore, TaskStoreError},
};
use mockable::Clock;

/// Read-only access to the current task snapshot.
pub trait TaskSource {
    /// Returns every task in insertion order.
    fn tasks(&self) -> &[Task];
}

/// Status mutation used when a drop lands on a column.
pub trait StatusTransition {
    /// Moves the task with `id` to `status`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the task is unknown or the change
    /// cannot be persisted.
    fn set_status(&mut self, id: &TaskId, status: TaskStatus) -> Result<Task, TaskStoreError>;
}

impl<S, C> TaskSource for TaskStore<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    fn tasks(&self) -> &[Task] {
        self.list_all()
    }
}

impl<S, C> StatusTransition for TaskStore<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    fn set_status(&mut self, id: &TaskId, status: TaskStatus) -> Result<Task, TaskStoreError> {
        Self::set_status(self, id, status)
    }
}
