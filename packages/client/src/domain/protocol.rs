//! Text protocol spoken with the game server.
//!
//! Every frame is a single UTF-8 line of the form `/<command>[ <payload>]`.
//!
//! Inbound (server → client):
//!
//! | Frame | Meaning |
//! |---|---|
//! | `/redirect <game_id>` | the client was placed in a game room |
//! | `/begin <n>` | the game starts in `n` |
//! | `/turn <indicator>` | `0` = own turn, anything else = opponent |
//! | `/win <indicator>` | `0` = we won, anything else = opponent won |
//!
//! Outbound (client → server): `/create`, `/join <game_id>`, `/name <name>`.

use std::fmt;

use thiserror::Error;

use super::value_object::{Countdown, GameId, PlayerName, Turn, Winner};

const REDIRECT: &str = "/redirect";
const BEGIN: &str = "/begin";
const TURN: &str = "/turn";
const WIN: &str = "/win";

const CREATE: &str = "/create";
const JOIN: &str = "/join";
const NAME: &str = "/name";

/// Errors produced when an inbound frame cannot be turned into a [`ServerMessage`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The frame does not start with any known command
    #[error("unknown server message: {0:?}")]
    UnknownPrefix(String),

    /// The command is known but its payload is missing or invalid
    #[error("malformed payload for {command}: {payload:?}")]
    MalformedPayload {
        command: &'static str,
        payload: String,
    },
}

/// Typed inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    Redirect { game_id: GameId },
    Begin { countdown: Countdown },
    Turn { turn: Turn },
    Win { winner: Winner },
}

impl ServerMessage {
    /// Parse one inbound text frame.
    ///
    /// The command token ends at the first space; the payload is everything
    /// after that single space. The `/redirect` payload is kept exactly as
    /// sent; the other payloads have trailing line endings and blanks removed.
    /// A known command without a payload is [`ParseError::MalformedPayload`].
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let (command, exact_payload) = match raw.split_once(' ') {
            Some((command, payload)) => (command, Some(payload)),
            None => (raw.trim_end(), None),
        };
        let payload = exact_payload.map(str::trim_end);

        match command {
            REDIRECT => {
                let payload = require_payload(REDIRECT, exact_payload)?;
                let game_id = GameId::new(payload).map_err(|_| malformed(REDIRECT, payload))?;
                Ok(ServerMessage::Redirect { game_id })
            }
            BEGIN => {
                let payload = require_payload(BEGIN, payload)?;
                let value = payload
                    .parse::<u32>()
                    .map_err(|_| malformed(BEGIN, payload))?;
                Ok(ServerMessage::Begin {
                    countdown: Countdown::new(value),
                })
            }
            TURN => {
                let payload = require_payload(TURN, payload)?;
                Ok(ServerMessage::Turn {
                    turn: Turn::from_indicator(payload),
                })
            }
            WIN => {
                let payload = require_payload(WIN, payload)?;
                Ok(ServerMessage::Win {
                    winner: Winner::from_indicator(payload),
                })
            }
            _ => Err(ParseError::UnknownPrefix(raw.to_string())),
        }
    }
}

fn require_payload<'a>(
    command: &'static str,
    payload: Option<&'a str>,
) -> Result<&'a str, ParseError> {
    match payload {
        Some(payload) if !payload.is_empty() => Ok(payload),
        other => Err(malformed(command, other.unwrap_or_default())),
    }
}

fn malformed(command: &'static str, payload: &str) -> ParseError {
    ParseError::MalformedPayload {
        command,
        payload: payload.to_string(),
    }
}

/// Typed outbound command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Ask the server to open a new game room
    Create,
    /// Join an existing game room
    Join(GameId),
    /// Set the display name for this session
    Name(PlayerName),
}

impl ClientCommand {
    /// Encode the command as the text frame sent on the wire
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ClientCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientCommand::Create => f.write_str(CREATE),
            ClientCommand::Join(game_id) => write!(f, "{} {}", JOIN, game_id),
            ClientCommand::Name(name) => write!(f, "{} {}", NAME, name),
        }
    }
}
