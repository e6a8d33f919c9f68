//! Message dispatcher: routes inbound frames to a [`GameEventHandler`].

#[cfg(test)]
use mockall::automock;

use crate::domain::{Countdown, GameId, ServerMessage, Turn, Winner};

/// Receiver of parsed server messages.
///
/// Exactly one method is called per recognised frame.
#[cfg_attr(test, automock)]
pub trait GameEventHandler {
    /// The server placed us in a game room
    fn on_redirect(&mut self, game_id: &GameId);

    /// The game starts after `countdown`
    fn on_begin(&mut self, countdown: Countdown);

    /// Whose turn it is now
    fn on_turn(&mut self, turn: Turn);

    /// The game ended
    fn on_win(&mut self, winner: Winner);
}

/// Parse `raw` and route it to the matching handler method.
///
/// Unrecognised or malformed frames are dropped: nothing is called and the
/// parse failure is only logged at debug level.
///
/// # Returns
///
/// The parsed message, or `None` if the frame was dropped.
pub fn dispatch(raw: &str, handler: &mut dyn GameEventHandler) -> Option<ServerMessage> {
    let message = match ServerMessage::parse(raw) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!("Dropping inbound frame: {}", e);
            return None;
        }
    };

    match &message {
        ServerMessage::Redirect { game_id } => handler.on_redirect(game_id),
        ServerMessage::Begin { countdown } => handler.on_begin(*countdown),
        ServerMessage::Turn { turn } => handler.on_turn(*turn),
        ServerMessage::Win { winner } => handler.on_win(*winner),
    }

    Some(message)
}
