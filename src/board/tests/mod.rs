//! Unit tests for the board projection and drag-and-drop controller.
