//! Local preference store for the player name and the "in game" flag.
//!
//! Values are plain strings; `is_in_game` holds `"true"` or `"false"`.
//! [`FilePreferenceStore`] keeps them in a JSON object on disk:
//!
//! - Linux: ~/.config/gameroom/preferences.json
//! - macOS: ~/Library/Application Support/io.gameroom.gameroom/preferences.json
//! - Windows: C:\Users\<User>\AppData\Roaming\gameroom\gameroom\config\preferences.json

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use thiserror::Error;

const PREFERENCES_FILE: &str = "preferences.json";

/// Errors raised while persisting preferences
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The fixed set of preference keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    Name,
    IsInGame,
}

impl PreferenceKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceKey::Name => "name",
            PreferenceKey::IsInGame => "is_in_game",
        }
    }
}

/// String key/value storage that survives restarts
pub trait PreferenceStore {
    /// The stored value, or `None` if the key was never set
    fn get(&self, key: PreferenceKey) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: PreferenceKey, value: &str) -> Result<(), PreferenceError>;
}

/// In-memory store, used when persistence is not wanted and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<PreferenceKey, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: PreferenceKey) -> Option<String> {
        self.values.get(&key).cloned()
    }

    fn set(&mut self, key: PreferenceKey, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key, value.to_string());
        Ok(())
    }
}

/// File-backed store.
///
/// The whole file is loaded on open and rewritten on every `set`. A missing
/// file is an empty store; an unreadable or corrupt file is logged and treated
/// as empty so a damaged file never prevents the client from starting.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
    cache: HashMap<String, String>,
}

impl FilePreferenceStore {
    /// Default location in the platform config directory.
    ///
    /// Falls back to the current directory if no home directory is known.
    pub fn default_path() -> PathBuf {
        match ProjectDirs::from("io", "gameroom", "gameroom") {
            Some(dirs) => dirs.config_dir().join(PREFERENCES_FILE),
            None => PathBuf::from(PREFERENCES_FILE),
        }
    }

    /// Open the store at `path`, loading existing values
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = load_map(&path);
        tracing::debug!("Preference store opened at: {:?}", path);
        Self { path, cache }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let data = serde_json::to_string_pretty(&self.cache)?;
        fs::write(&self.path, data).map_err(|source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn load_map(path: &Path) -> HashMap<String, String> {
    if !path.exists() {
        return HashMap::new();
    }

    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Failed to parse preference file: {}", e);
                HashMap::new()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read preference file: {}", e);
            HashMap::new()
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: PreferenceKey) -> Option<String> {
        self.cache.get(key.as_str()).cloned()
    }

    fn set(&mut self, key: PreferenceKey, value: &str) -> Result<(), PreferenceError> {
        self.cache.insert(key.as_str().to_string(), value.to_string());
        self.persist()
    }
}

/// Named accessors over a [`PreferenceStore`]
#[derive(Debug, Clone, Default)]
pub struct Preferences<S> {
    store: S,
}

impl<S: PreferenceStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), PreferenceError> {
        self.store.set(PreferenceKey::Name, name)
    }

    pub fn name(&self) -> Option<String> {
        self.store.get(PreferenceKey::Name)
    }

    /// Mark the player as being in a game
    pub fn enter_game(&mut self) -> Result<(), PreferenceError> {
        self.store.set(PreferenceKey::IsInGame, &true.to_string())
    }

    /// Mark the player as having left the game
    pub fn set_game_left(&mut self) -> Result<(), PreferenceError> {
        self.store.set(PreferenceKey::IsInGame, &false.to_string())
    }

    /// The raw stored flag (`"true"`, `"false"`, or `None` if never set)
    pub fn is_in_game(&self) -> Option<String> {
        self.store.get(PreferenceKey::IsInGame)
    }

    /// The stored flag as a boolean; anything but `"true"` is `false`
    pub fn in_game(&self) -> bool {
        self.is_in_game().as_deref() == Some("true")
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
