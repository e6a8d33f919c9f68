//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        get_timestamp()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn get_timestamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to a `HH:MM:SS` wall-clock string (UTC).
///
/// Timestamps outside chrono's representable range render as `--:--:--`.
pub fn timestamp_to_clock_time(timestamp_millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_millis) {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_fixed_time() {
        // テスト項目: FixedClock が固定された時刻を返す
        // given (前提条件):
        let clock = FixedClock::new(1672498800000);

        // when (操作):
        let first = clock.now_millis();
        let second = clock.now_millis();

        // then (期待する結果):
        assert_eq!(first, 1672498800000);
        assert_eq!(second, 1672498800000);
    }

    #[test]
    fn test_system_clock_is_after_2023() {
        // テスト項目: SystemClock が現在時刻（2023 年以降）を返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let now = clock.now_millis();

        // then (期待する結果):
        assert!(now > 1672498800000);
    }

    #[test]
    fn test_timestamp_to_clock_time() {
        // テスト項目: タイムスタンプが HH:MM:SS 形式に変換される
        // given (前提条件):
        // 2023-01-01T15:00:00Z
        let timestamp = 1672585200000;

        // when (操作):
        let result = timestamp_to_clock_time(timestamp);

        // then (期待する結果):
        assert_eq!(result, "15:00:00");
    }

    #[test]
    fn test_timestamp_to_clock_time_out_of_range() {
        // テスト項目: 範囲外のタイムスタンプはプレースホルダーになる
        // given (前提条件):
        let timestamp = i64::MAX;

        // when (操作):
        let result = timestamp_to_clock_time(timestamp);

        // then (期待する結果):
        assert_eq!(result, "--:--:--");
    }
}
