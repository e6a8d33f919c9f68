//! Client-side routes and the navigation boundary.
//!
//! Two routes exist: the home screen at `/` and a game room at `/{game_id}`.
//! The game id is percent-encoded in the path, so ids containing spaces or
//! `/` still form a single segment.

use std::fmt;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

#[cfg(test)]
use mockall::automock;

use crate::domain::GameId;

/// Characters escaped in a path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Game(GameId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Game(game_id) => {
                format!("/{}", utf8_percent_encode(game_id.as_str(), SEGMENT))
            }
        }
    }

    /// Parse a path back into a route. Returns `None` for paths that match
    /// neither `/` nor `/{game_id}`.
    pub fn from_path(path: &str) -> Option<Self> {
        let segment = path.strip_prefix('/')?;
        if segment.is_empty() {
            return Some(Route::Home);
        }
        if segment.contains('/') {
            return None;
        }
        let game_id = percent_decode_str(segment).decode_utf8().ok()?;
        GameId::new(game_id).ok().map(Route::Game)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Receiver of route changes
#[cfg_attr(test, automock)]
pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

/// Navigator that keeps the current route and every previous one
#[derive(Debug, Clone, Default)]
pub struct HistoryNavigator {
    current: Route,
    history: Vec<Route>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Routes left behind, oldest first
    pub fn history(&self) -> &[Route] {
        &self.history
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        tracing::info!("Navigating {} -> {}", self.current, route);
        let previous = std::mem::replace(&mut self.current, route);
        self.history.push(previous);
    }
}
