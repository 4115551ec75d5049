//! Taskboard: a personal task board.
//!
//! Users move tasks across three stages (to-do, in-progress, completed).
//! This crate holds the task state engine behind the board: the task
//! entity, a per-user durable store, the stage projection, and the
//! drag-and-drop transition controller.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and identity
//! - **Adapters**: Concrete implementations of ports (memory, filesystem)
//!
//! # Modules
//!
//! - [`task`]: Task entity, storage contract, and the task store
//! - [`board`]: Stage projection and drag-and-drop transitions
//! - [`config`]: Layered configuration for front ends

pub mod board;
pub mod config;
pub mod task;
