//! Task state engine for the board.
//!
//! Owns the task entity, its persistence contract, and the store operations
//! (create, update, move, delete, query by stage) that back the board. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The task store in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
