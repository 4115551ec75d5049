//! Board-facing views over the task store.
//!
//! [`BoardProjection`] groups the current snapshot into the three stages and
//! [`TransitionController`] turns drag-and-drop gestures into status
//! changes. Both reach the store only through the traits in [`ports`], so
//! the view layer never holds a mutable handle of its own.

pub mod ports;
mod projection;
mod transition;

pub use ports::{StatusTransition, TaskSource};
pub use projection::{Board, BoardProjection, Column};
pub use transition::{DragState, DropOutcome, TransitionController};

#[cfg(test)]
mod tests;
