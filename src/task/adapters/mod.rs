//! Adapter implementations of the task board ports.

pub mod filesystem;
pub mod identity;
pub mod memory;
