//! Value objects for the game client.
//!
//! Each value object validates its invariant on construction, so code that
//! receives a `GameId` or `PlayerName` never has to re-check it.

use std::fmt;

use thiserror::Error;

/// Errors raised when constructing a value object
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Game ID was empty
    #[error("game id must not be empty")]
    EmptyGameId,

    /// Game ID contained a line break
    #[error("game id {0:?} must be a single line")]
    InvalidGameId(String),

    /// Player name was empty or blank
    #[error("player name must not be empty")]
    EmptyPlayerName,

    /// Player name contained a line break
    #[error("player name must be a single line")]
    InvalidPlayerName,
}

/// Identifier of a game room, assigned by the server.
///
/// Any non-empty single line is accepted as sent by the server, spaces and
/// `/` included; the server reads everything after `/join ` as the id.
/// [`Route::path`](crate::navigation::Route::path) percent-encodes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameId(String);

impl GameId {
    /// Create a new GameId, validating its format
    pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValueObjectError::EmptyGameId);
        }
        if value.contains(['\n', '\r']) {
            return Err(ValueObjectError::InvalidGameId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for GameId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for GameId {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name of the local player.
///
/// Inner spaces are allowed (the server keeps everything after `/name `).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyPlayerName);
        }
        if value.contains(['\n', '\r']) {
            return Err(ValueObjectError::InvalidPlayerName);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whose turn it is, as reported by `/turn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Indicator `0`
    Own,
    /// Any other indicator
    Opponent,
}

impl Turn {
    pub fn from_indicator(indicator: &str) -> Self {
        if indicator == "0" {
            Turn::Own
        } else {
            Turn::Opponent
        }
    }
}

/// Outcome of a finished game, as reported by `/win`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// Indicator `0`
    Me,
    /// Any other indicator
    Opponent,
}

impl Winner {
    pub fn from_indicator(indicator: &str) -> Self {
        if indicator == "0" {
            Winner::Me
        } else {
            Winner::Opponent
        }
    }
}

/// Countdown before a game starts, as reported by `/begin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Countdown(u32);

impl Countdown {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_id_valid() {
        // テスト項目: 有効なゲーム ID が生成できる
        // given (前提条件):
        let value = "k3x9q";

        // when (操作):
        let result = GameId::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "k3x9q");
    }

    #[test]
    fn test_game_id_empty_is_rejected() {
        // テスト項目: 空のゲーム ID は拒否される
        // given (前提条件):
        let value = "";

        // when (操作):
        let result = GameId::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyGameId));
    }

    #[test]
    fn test_game_id_keeps_spaces_and_slashes() {
        // テスト項目: 空白やスラッシュを含むゲーム ID はそのまま保持される
        // given (前提条件):
        let values = ["a b", "x/y", "abc  "];

        // when (操作):
        let ids: Vec<GameId> = values.iter().map(|v| GameId::new(*v).unwrap()).collect();

        // then (期待する結果):
        let stored: Vec<&str> = ids.iter().map(GameId::as_str).collect();
        assert_eq!(stored, values);
    }

    #[test]
    fn test_game_id_with_line_break_is_rejected() {
        // テスト項目: 改行を含むゲーム ID は拒否される
        // given (前提条件):
        let value = "abc\r\n";

        // when (操作):
        let result = GameId::new(value);

        // then (期待する結果):
        assert!(matches!(result, Err(ValueObjectError::InvalidGameId(_))));
    }

    #[test]
    fn test_player_name_allows_inner_spaces() {
        // テスト項目: プレイヤー名は内部に空白を含められる
        // given (前提条件):
        let value = "John Smith";

        // when (操作):
        let result = PlayerName::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "John Smith");
    }

    #[test]
    fn test_player_name_blank_is_rejected() {
        // テスト項目: 空白のみのプレイヤー名は拒否される
        // given (前提条件):
        let value = "   ";

        // when (操作):
        let result = PlayerName::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyPlayerName));
    }

    #[test]
    fn test_player_name_multiline_is_rejected() {
        // テスト項目: 改行を含むプレイヤー名は拒否される
        // given (前提条件):
        let value = "alice\n/create";

        // when (操作):
        let result = PlayerName::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::InvalidPlayerName));
    }

    #[test]
    fn test_turn_from_indicator() {
        // テスト項目: ターン指標 "0" は自分の番、それ以外は相手の番
        // given (前提条件):
        let indicators = ["0", "1", "2", "00", "01", "0 x"];

        // when (操作):
        let turns: Vec<Turn> = indicators.iter().map(|i| Turn::from_indicator(i)).collect();

        // then (期待する結果):
        assert_eq!(
            turns,
            vec![
                Turn::Own,
                Turn::Opponent,
                Turn::Opponent,
                Turn::Opponent,
                Turn::Opponent,
                Turn::Opponent,
            ]
        );
    }

    #[test]
    fn test_winner_from_indicator() {
        // テスト項目: 勝者指標 "0" は自分の勝ち、それ以外は相手の勝ち
        // given (前提条件):
        let me = "0";
        let other = "7";

        // when (操作):
        let me_result = Winner::from_indicator(me);
        let other_result = Winner::from_indicator(other);

        // then (期待する結果):
        assert_eq!(me_result, Winner::Me);
        assert_eq!(other_result, Winner::Opponent);
    }
}
