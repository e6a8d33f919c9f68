//! Domain layer: value objects and the text protocol spoken with the game server.
//!
//! Nothing in here performs I/O.

pub mod protocol;
pub mod value_object;

pub use protocol::{ClientCommand, ParseError, ServerMessage};
pub use value_object::{Countdown, GameId, PlayerName, Turn, ValueObjectError, Winner};
