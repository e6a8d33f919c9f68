//! Message formatting utilities for client display.

use gameroom_shared::time::timestamp_to_clock_time;

use crate::{
    connection::{CloseInfo, ConnectionState},
    domain::{Countdown, GameId, Turn, Winner},
    navigation::Route,
};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the notification shown when the server places us in a game
    ///
    /// # Arguments
    ///
    /// * `game_id` - The game room we were redirected to
    /// * `received_at` - Unix timestamp when the message arrived (milliseconds)
    pub fn format_redirect(game_id: &GameId, received_at: i64) -> String {
        format!(
            "[{}] Joined game {} (share this id with your opponent)",
            timestamp_to_clock_time(received_at),
            game_id
        )
    }

    /// Format the game-starting countdown
    pub fn format_begin(countdown: Countdown, received_at: i64) -> String {
        format!(
            "[{}] Game starting in {}",
            timestamp_to_clock_time(received_at),
            countdown
        )
    }

    /// Format a turn notification
    pub fn format_turn(turn: Turn, received_at: i64) -> String {
        let whose = match turn {
            Turn::Own => "Your turn",
            Turn::Opponent => "Opponent's turn",
        };
        format!("[{}] {}", timestamp_to_clock_time(received_at), whose)
    }

    /// Format the game outcome
    pub fn format_win(winner: Winner, received_at: i64) -> String {
        let outcome = match winner {
            Winner::Me => "You win!",
            Winner::Opponent => "Your opponent wins.",
        };
        format!("[{}] {}", timestamp_to_clock_time(received_at), outcome)
    }

    /// Format the banner shown once the connection opens
    ///
    /// # Arguments
    ///
    /// * `name` - The stored player name, if any
    pub fn format_connected(name: Option<&str>) -> String {
        let who = match name {
            Some(name) => format!("You are '{}'.", name),
            None => "Set a name with /name <name>.".to_string(),
        };
        format!(
            "\n{} Type /create to open a game, /join <id> to join one, /help for all commands.\n",
            who
        )
    }

    /// Format a close event
    pub fn format_closed(info: &CloseInfo) -> String {
        if info.was_clean {
            if info.reason.is_empty() {
                format!("Connection closed (code {})", info.code)
            } else {
                format!("Connection closed (code {}): {}", info.code, info.reason)
            }
        } else {
            "Connection to the game server was lost".to_string()
        }
    }

    /// Format the `/status` report
    pub fn format_status(
        state: ConnectionState,
        route: &Route,
        name: Option<&str>,
        in_game: bool,
    ) -> String {
        format!(
            "connection: {:?}\nroute: {}\nname: {}\nin game: {}",
            state,
            route,
            name.unwrap_or("(not set)"),
            in_game
        )
    }

    /// Format the list of commands understood at the prompt
    pub fn format_help() -> String {
        [
            "/create        open a new game",
            "/join <id>     join an existing game",
            "/name <name>   set your name",
            "/leave         leave the current game",
            "/status        show connection and game status",
            "/quit          close the connection and exit",
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2023-01-01T15:00:00Z
    const RECEIVED_AT: i64 = 1672585200000;

    #[test]
    fn test_format_redirect() {
        // テスト項目: リダイレクト通知にゲーム ID と時刻が含まれる
        // given (前提条件):
        let game_id = GameId::new("k3x9q").unwrap();

        // when (操作):
        let result = MessageFormatter::format_redirect(&game_id, RECEIVED_AT);

        // then (期待する結果):
        assert!(result.contains("k3x9q"));
        assert!(result.starts_with("[15:00:00]"));
    }

    #[test]
    fn test_format_begin() {
        // テスト項目: 開始カウントダウンが表示される
        // given (前提条件):
        let countdown = Countdown::new(3);

        // when (操作):
        let result = MessageFormatter::format_begin(countdown, RECEIVED_AT);

        // then (期待する結果):
        assert_eq!(result, "[15:00:00] Game starting in 3");
    }

    #[test]
    fn test_format_turn() {
        // テスト項目: 自分の番と相手の番が区別して表示される
        // given (前提条件):
        let own = Turn::Own;
        let opponent = Turn::Opponent;

        // when (操作):
        let own_result = MessageFormatter::format_turn(own, RECEIVED_AT);
        let opponent_result = MessageFormatter::format_turn(opponent, RECEIVED_AT);

        // then (期待する結果):
        assert!(own_result.ends_with("Your turn"));
        assert!(opponent_result.ends_with("Opponent's turn"));
    }

    #[test]
    fn test_format_win() {
        // テスト項目: 勝敗が区別して表示される
        // given (前提条件):
        let me = Winner::Me;
        let opponent = Winner::Opponent;

        // when (操作):
        let me_result = MessageFormatter::format_win(me, RECEIVED_AT);
        let opponent_result = MessageFormatter::format_win(opponent, RECEIVED_AT);

        // then (期待する結果):
        assert!(me_result.contains("You win!"));
        assert!(opponent_result.contains("opponent wins"));
    }

    #[test]
    fn test_format_connected_with_and_without_name() {
        // テスト項目: 接続バナーは保存済みの名前の有無で内容が変わる
        // given (前提条件):
        let name = Some("alice");

        // when (操作):
        let with_name = MessageFormatter::format_connected(name);
        let without_name = MessageFormatter::format_connected(None);

        // then (期待する結果):
        assert!(with_name.contains("You are 'alice'."));
        assert!(without_name.contains("/name <name>"));
    }

    #[test]
    fn test_format_closed() {
        // テスト項目: 正常クローズと異常切断が区別して表示される
        // given (前提条件):
        let clean = CloseInfo {
            was_clean: true,
            code: 1001,
            reason: "server restarting".to_string(),
        };
        let died = CloseInfo::abnormal();

        // when (操作):
        let clean_result = MessageFormatter::format_closed(&clean);
        let died_result = MessageFormatter::format_closed(&died);

        // then (期待する結果):
        assert_eq!(
            clean_result,
            "Connection closed (code 1001): server restarting"
        );
        assert!(died_result.contains("lost"));
    }

    #[test]
    fn test_format_status() {
        // テスト項目: ステータス表示に接続状態・ルート・名前・参加状態が含まれる
        // given (前提条件):
        let route = Route::Game(GameId::new("k3x9q").unwrap());

        // when (操作):
        let result =
            MessageFormatter::format_status(ConnectionState::Open, &route, None, true);

        // then (期待する結果):
        assert!(result.contains("connection: Open"));
        assert!(result.contains("route: /k3x9q"));
        assert!(result.contains("name: (not set)"));
        assert!(result.contains("in game: true"));
    }
}
