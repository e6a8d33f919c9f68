//! Parsing of lines typed at the prompt.

use thiserror::Error;

use crate::domain::{GameId, PlayerName, ValueObjectError};

/// A command typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Create,
    Join(GameId),
    Name(PlayerName),
    Leave,
    Status,
    Help,
    Quit,
}

/// Why a typed line was not understood
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command: {0} (type /help)")]
    UnknownCommand(String),

    #[error("{0} requires an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    InvalidArgument(#[from] ValueObjectError),
}

impl UserInput {
    pub fn parse(line: &str) -> Result<Self, InputError> {
        let line = line.trim();
        let (command, argument) = match line.split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command {
            "/create" => Ok(UserInput::Create),
            "/join" => {
                if argument.is_empty() {
                    return Err(InputError::MissingArgument("/join"));
                }
                Ok(UserInput::Join(GameId::new(argument)?))
            }
            "/name" => {
                if argument.is_empty() {
                    return Err(InputError::MissingArgument("/name"));
                }
                Ok(UserInput::Name(PlayerName::new(argument)?))
            }
            "/leave" => Ok(UserInput::Leave),
            "/status" => Ok(UserInput::Status),
            "/help" => Ok(UserInput::Help),
            "/quit" | "/exit" => Ok(UserInput::Quit),
            _ => Err(InputError::UnknownCommand(line.to_string())),
        }
    }
}
