//! Domain model for the task board.
//!
//! A task is the sole entity. It belongs to exactly one owner and sits in one
//! of three workflow stages. All infrastructure concerns (storage, identity)
//! stay outside of the domain boundary.

mod error;
mod ids;
mod patch;
mod status;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{OwnerId, TaskId, TaskTitle};
pub use patch::TaskPatch;
pub use status::{TaskPriority, TaskStatus};
pub use task::{NewTask, Task};
