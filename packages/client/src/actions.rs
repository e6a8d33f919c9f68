//! Action senders: format outbound commands and hand them to a [`CommandSink`].
//!
//! No acknowledgement is awaited. Success is only observable through later
//! inbound frames (for example `/redirect` after `/create`).

#[cfg(test)]
use mockall::automock;

use crate::{
    connection::ConnectionManager,
    domain::{ClientCommand, GameId, PlayerName},
    error::ClientError,
};

/// Anything that can transmit one text frame to the server
#[cfg_attr(test, automock)]
pub trait CommandSink {
    fn send_text(&self, text: &str) -> Result<(), ClientError>;
}

impl CommandSink for ConnectionManager {
    fn send_text(&self, text: &str) -> Result<(), ClientError> {
        self.send(text)
    }
}

fn send_command(sink: &dyn CommandSink, command: ClientCommand) -> Result<(), ClientError> {
    sink.send_text(&command.encode())
}

/// Send `/create`
pub fn create_game(sink: &dyn CommandSink) -> Result<(), ClientError> {
    send_command(sink, ClientCommand::Create)
}

/// Send `/join {game_id}`
pub fn join_game(sink: &dyn CommandSink, game_id: &GameId) -> Result<(), ClientError> {
    send_command(sink, ClientCommand::Join(game_id.clone()))
}

/// Send `/name {name}`
pub fn send_name(sink: &dyn CommandSink, name: &PlayerName) -> Result<(), ClientError> {
    send_command(sink, ClientCommand::Name(name.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_game_sends_create() {
        // テスト項目: create_game は "/create" を送信する
        // given (前提条件):
        let mut sink = MockCommandSink::new();
        sink.expect_send_text()
            .withf(|text| text == "/create")
            .times(1)
            .returning(|_| Ok(()));

        // when (操作):
        let result = create_game(&sink);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_join_game_sends_exact_string() {
        // テスト項目: join_game("abc") は正確に "/join abc" を送信する
        // given (前提条件):
        let mut sink = MockCommandSink::new();
        sink.expect_send_text()
            .withf(|text| text == "/join abc")
            .times(1)
            .returning(|_| Ok(()));
        let game_id = GameId::new("abc").unwrap();

        // when (操作):
        let result = join_game(&sink, &game_id);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_send_name_sends_name_command() {
        // テスト項目: send_name は "/name {name}" を送信する
        // given (前提条件):
        let mut sink = MockCommandSink::new();
        sink.expect_send_text()
            .withf(|text| text == "/name John")
            .times(1)
            .returning(|_| Ok(()));
        let name = PlayerName::new("John").unwrap();

        // when (操作):
        let result = send_name(&sink, &name);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_sink_error_is_returned() {
        // テスト項目: 送信先のエラーが呼び出し元に返される
        // given (前提条件):
        let mut sink = MockCommandSink::new();
        sink.expect_send_text()
            .returning(|_| Err(ClientError::NotConnected));

        // when (操作):
        let result = create_game(&sink);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::NotConnected)));
    }

    #[test]
    fn test_connection_manager_sink_requires_open_connection() {
        // テスト項目: 未接続の ConnectionManager への送信は NotConnected になる
        // given (前提条件):
        let (manager, _events) = ConnectionManager::new();
        let game_id = GameId::new("abc").unwrap();

        // when (操作):
        let result = join_game(&manager, &game_id);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::NotConnected)));
    }
}
