//! Partial field updates applied to an existing task.

use super::{TaskPriority, TaskStatus, TaskTitle};
use chrono::NaiveDate;

/// Set of optional field replacements for a task.
///
/// Fields left as `None` are not touched. The due date is doubly optional so
/// that a patch can distinguish "leave as is" from "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement due date; `Some(None)` clears it.
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the replacement status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the replacement due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Clears the due date.
    #[must_use]
    pub const fn clearing_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Returns `true` when the patch carries no replacements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }
}
