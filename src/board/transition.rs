//! Drag-and-drop gesture state machine.
//!
//! `Idle -> Dragging` on [`TransitionController::begin_drag`], and back to
//! `Idle` on a matching [`TransitionController::complete_drop`] or on
//! [`TransitionController::cancel_drag`]. Only one task is tracked at a time;
//! a second `begin_drag` replaces the first.

use super::StatusTransition;
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    services::TaskStoreError,
};
use tracing::{debug, warn};

/// Current gesture state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// The task being dragged.
    Dragging(TaskId),
}

/// Result of a drop event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// The task was moved; carries its updated state.
    Moved(Task),
    /// No matching drag was in progress, nothing changed.
    Ignored,
}

/// Translates drag gestures into status changes.
#[derive(Debug, Clone, Default)]
pub struct TransitionController {
    state: DragState,
}

impl TransitionController {
    /// Creates an idle controller.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// Returns the gesture state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns the task being dragged, if any.
    #[must_use]
    pub const fn dragging(&self) -> Option<&TaskId> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(id) => Some(id),
        }
    }

    /// Starts tracking `task_id`, replacing any task already tracked.
    pub fn begin_drag(&mut self, task_id: TaskId) {
        if let DragState::Dragging(previous) = &self.state {
            debug!(previous = %previous, next = %task_id, "drag replaced");
        }
        self.state = DragState::Dragging(task_id);
    }

    /// Ends the gesture by dropping `task_id` on the `status` column.
    ///
    /// The move happens only when `task_id` is the task being dragged; any
    /// other drop is ignored and leaves the gesture state untouched. The
    /// gesture ends before the store is called, so a failed move does not
    /// leave a stale drag behind.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the store rejects the move.
    pub fn complete_drop<T>(
        &mut self,
        store: &mut T,
        task_id: &TaskId,
        status: TaskStatus,
    ) -> Result<DropOutcome, TaskStoreError>
    where
        T: StatusTransition + ?Sized,
    {
        if self.dragging() != Some(task_id) {
            warn!(task_id = %task_id, "drop without matching drag ignored");
            return Ok(DropOutcome::Ignored);
        }
        self.state = DragState::Idle;
        store.set_status(task_id, status).map(DropOutcome::Moved)
    }

    /// Abandons the gesture without touching any task.
    pub fn cancel_drag(&mut self) {
        self.state = DragState::Idle;
    }
}
