//! Client execution logic.
//!
//! One session per run: when the connection closes the client exits. There
//! is no reconnection.

use crate::{
    config::ClientConfig,
    error::ClientError,
    session::{SessionEnd, run_client_session},
};

/// Map how a session ended onto the client's result
pub fn session_outcome(end: SessionEnd) -> Result<(), ClientError> {
    match end {
        SessionEnd::UserQuit => {
            tracing::info!("Client session ended normally");
            Ok(())
        }
        SessionEnd::ConnectionClosed(info) if info.was_clean => {
            tracing::info!(
                "Server closed the connection (code={} reason={})",
                info.code,
                info.reason
            );
            Ok(())
        }
        SessionEnd::ConnectionClosed(info) => Err(ClientError::ConnectionError(format!(
            "Connection lost (code={})",
            info.code
        ))),
    }
}

/// Run the game client
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    tracing::info!("Attempting to connect to {}", config.url);
    let end = run_client_session(&config).await?;
    session_outcome(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::CloseInfo;

    #[test]
    fn test_user_quit_is_success() {
        // テスト項目: ユーザーの終了操作は正常終了として扱われる
        // given (前提条件):
        let end = SessionEnd::UserQuit;

        // when (操作):
        let result = session_outcome(end);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_clean_server_close_is_success() {
        // テスト項目: サーバーによる正常クローズは正常終了として扱われる
        // given (前提条件):
        let end = SessionEnd::ConnectionClosed(CloseInfo {
            was_clean: true,
            code: 1000,
            reason: String::new(),
        });

        // when (操作):
        let result = session_outcome(end);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_abnormal_close_is_connection_error() {
        // テスト項目: 異常切断は ConnectionError として扱われる
        // given (前提条件):
        let end = SessionEnd::ConnectionClosed(CloseInfo::abnormal());

        // when (操作):
        let result = session_outcome(end);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::ConnectionError(msg)) if msg.contains("1006")));
    }
}
