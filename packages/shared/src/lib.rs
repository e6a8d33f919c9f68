//! Shared utilities for the Gameroom workspace.

pub mod logger;
pub mod time;
