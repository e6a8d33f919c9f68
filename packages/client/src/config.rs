//! Client configuration.

use std::path::PathBuf;

use crate::preferences::FilePreferenceStore;

/// Game server endpoint used when none is given on the command line
pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8080/ws";

/// Settings for one client run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket URL of the game server
    pub url: String,
    /// Preference file; `None` selects the platform default
    pub preferences_path: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            preferences_path: None,
        }
    }

    pub fn with_preferences_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_path = Some(path.into());
        self
    }

    /// The preference file to open
    pub fn resolved_preferences_path(&self) -> PathBuf {
        self.preferences_path
            .clone()
            .unwrap_or_else(FilePreferenceStore::default_path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}
