//! Task aggregate root.

use super::{OwnerId, TaskId, TaskPatch, TaskPriority, TaskStatus, TaskTitle};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated caller-supplied fields for a task that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: TaskTitle,
    /// Free-form description, possibly empty.
    pub description: String,
    /// Priority level.
    pub priority: TaskPriority,
    /// Initial workflow stage.
    pub status: TaskStatus,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
}

/// Task aggregate root.
///
/// The serialised form is the stored document shape: camelCase fields with
/// the owner exposed as `userId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    priority: TaskPriority,
    status: TaskStatus,
    due_date: Option<NaiveDate>,
    #[serde(rename = "userId")]
    owner_id: OwnerId,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task owned by `owner_id`, stamped with the clock's
    /// current time.
    #[must_use]
    pub fn new(id: TaskId, owner_id: OwnerId, fields: NewTask, clock: &impl Clock) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            priority: fields.priority,
            status: fields.status,
            due_date: fields.due_date,
            owner_id,
            created_at: clock.utc(),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the workflow stage.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Merges the supplied fields onto this task.
    ///
    /// Identifier, owner and creation time are never touched.
    pub fn apply(&mut self, patch: TaskPatch) {
        let TaskPatch {
            title,
            description,
            priority,
            status,
            due_date,
        } = patch;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
    }

    /// Moves the task to `status`, whatever its current stage.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Returns `true` when the due date lies strictly before `today` and the
    /// task is not completed.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Completed && self.due_date.is_some_and(|due| due < today)
    }

    /// Returns the due date for display, e.g. `Jan 5, 2026`.
    #[must_use]
    pub fn due_date_label(&self) -> String {
        self.due_date.map_or_else(
            || "No due date".to_owned(),
            |due| due.format("%b %-d, %Y").to_string(),
        )
    }
}
