//! Example tasks written for users with no stored collection.

use crate::task::domain::{
    NewTask, OwnerId, Task, TaskDomainError, TaskId, TaskPriority, TaskStatus, TaskTitle,
};
use chrono::{Days, NaiveDate};
use mockable::Clock;

struct SampleTask {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    priority: TaskPriority,
    status: TaskStatus,
    due: fn(NaiveDate) -> NaiveDate,
}

fn tomorrow(today: NaiveDate) -> NaiveDate {
    today + Days::new(1)
}

fn day_after_tomorrow(today: NaiveDate) -> NaiveDate {
    today + Days::new(2)
}

fn yesterday(today: NaiveDate) -> NaiveDate {
    today - Days::new(1)
}

const SAMPLES: [SampleTask; 3] = [
    SampleTask {
        id: "1",
        title: "Welcome to Task Manager",
        description: "This is a sample task. You can create, edit, and delete tasks.",
        priority: TaskPriority::Medium,
        status: TaskStatus::Todo,
        due: tomorrow,
    },
    SampleTask {
        id: "2",
        title: "Try dragging tasks",
        description: "You can drag and drop tasks between columns to change their status.",
        priority: TaskPriority::Low,
        status: TaskStatus::InProgress,
        due: day_after_tomorrow,
    },
    SampleTask {
        id: "3",
        title: "Set task priorities",
        description: "Tasks can have different priority levels: Low, Medium, or High.",
        priority: TaskPriority::High,
        status: TaskStatus::Completed,
        due: yesterday,
    },
];

/// Builds the three example tasks for `owner`, one per stage.
///
/// Due dates are relative to the clock's current UTC date: tomorrow for the
/// to-do task, the day after for the in-progress task, and yesterday for the
/// completed one.
///
/// # Errors
///
/// Returns [`TaskDomainError`] if a sample value fails validation.
pub fn sample_tasks(owner: &OwnerId, clock: &impl Clock) -> Result<Vec<Task>, TaskDomainError> {
    let today = clock.utc().date_naive();
    SAMPLES
        .iter()
        .map(|sample| {
            let fields = NewTask {
                title: TaskTitle::new(sample.title)?,
                description: sample.description.to_owned(),
                priority: sample.priority,
                status: sample.status,
                due_date: Some((sample.due)(today)),
            };
            Ok(Task::new(
                TaskId::new(sample.id)?,
                owner.clone(),
                fields,
                clock,
            ))
        })
        .collect()
}
