//! Application services for the task board.

mod seed;
mod store;

pub use seed::sample_tasks;
pub use store::{CreateTaskRequest, TaskStore, TaskStoreError, TaskStoreResult};
