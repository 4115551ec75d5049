//! Stage-partitioned view of the task snapshot.

use super::TaskSource;
use crate::task::domain::{Task, TaskStatus};
use chrono::NaiveDate;

/// One board column: a stage and the tasks currently in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<'a> {
    status: TaskStatus,
    tasks: Vec<&'a Task>,
}

impl<'a> Column<'a> {
    /// Returns the stage shown by this column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the column heading.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.status.title()
    }

    /// Returns the tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[&'a Task] {
        &self.tasks
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the column holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// The full board: every task placed in exactly one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<'a> {
    todo: Column<'a>,
    in_progress: Column<'a>,
    completed: Column<'a>,
}

impl<'a> Board<'a> {
    /// Returns the column for `status`.
    #[must_use]
    pub const fn column(&self, status: TaskStatus) -> &Column<'a> {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
        }
    }

    /// Returns the columns in board order.
    #[must_use]
    pub const fn columns(&self) -> [&Column<'a>; 3] {
        [&self.todo, &self.in_progress, &self.completed]
    }

    /// Returns the number of tasks across all columns.
    #[must_use]
    pub fn total(&self) -> usize {
        self.columns().iter().map(|column| column.len()).sum()
    }
}

/// Read-only projection over a [`TaskSource`].
///
/// Nothing is cached; every call regroups the source's current snapshot.
pub struct BoardProjection<'a, T: TaskSource + ?Sized> {
    source: &'a T,
}

impl<T: TaskSource + ?Sized> Clone for BoardProjection<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: TaskSource + ?Sized> Copy for BoardProjection<'_, T> {}

impl<'a, T: TaskSource + ?Sized> BoardProjection<'a, T> {
    /// Creates a projection over `source`.
    #[must_use]
    pub const fn new(source: &'a T) -> Self {
        Self { source }
    }

    /// Returns the tasks in `status`, preserving their relative order.
    #[must_use]
    pub fn by_status(&self, status: TaskStatus) -> Vec<&'a Task> {
        self.source
            .tasks()
            .iter()
            .filter(|task| task.status() == status)
            .collect()
    }

    /// Groups the snapshot into the three columns.
    #[must_use]
    pub fn board(&self) -> Board<'a> {
        let column = |status| Column {
            status,
            tasks: self.by_status(status),
        };
        Board {
            todo: column(TaskStatus::Todo),
            in_progress: column(TaskStatus::InProgress),
            completed: column(TaskStatus::Completed),
        }
    }

    /// Returns the tasks that are overdue as of `today`.
    #[must_use]
    pub fn overdue(&self, today: NaiveDate) -> Vec<&'a Task> {
        self.source
            .tasks()
            .iter()
            .filter(|task| task.is_overdue(today))
            .collect()
    }
}
