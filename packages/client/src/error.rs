//! Error types for the game client.

use thiserror::Error;

use crate::preferences::PreferenceError;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// A connection is already connecting or open
    #[error("A connection is already open or being established")]
    AlreadyConnected,

    /// There is no open connection to send on
    #[error("Not connected to the game server")]
    NotConnected,

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Reading or writing local preferences failed
    #[error(transparent)]
    Preference(#[from] PreferenceError),
}
