//! Terminal client for a turn-based multiplayer game played over WebSocket.
//!
//! The client keeps one connection to the game server, routes the server's
//! text messages (`/redirect`, `/begin`, `/turn`, `/win`) to a handler, sends
//! the player's commands (`/create`, `/join`, `/name`) and remembers the
//! player name and "in game" flag between runs.

// domain
pub mod domain;

// connection and protocol plumbing
pub mod actions;
pub mod connection;
pub mod dispatcher;
pub mod error;

// local state
pub mod navigation;
pub mod preferences;

// terminal client
pub mod config;
pub mod formatter;
pub mod input;
pub mod runner;
pub mod session;
pub mod ui;
pub mod view;

pub use config::{ClientConfig, DEFAULT_SERVER_URL};
pub use error::ClientError;
pub use runner::run_client;
