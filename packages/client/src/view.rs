//! Terminal-side handler for server messages.
//!
//! `GameView` reacts to dispatched messages: it navigates on redirect, keeps
//! the in-game preference up to date, and renders a line for each event into
//! a transcript that the session prints.

use std::collections::VecDeque;

use gameroom_shared::time::Clock;

use crate::{
    dispatcher::GameEventHandler,
    domain::{Countdown, GameId, Turn, Winner},
    formatter::MessageFormatter,
    navigation::{Navigator, Route},
    preferences::{PreferenceStore, Preferences},
};

/// Latest game facts reported by the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStatus {
    pub game_id: Option<GameId>,
    pub countdown: Option<Countdown>,
    pub turn: Option<Turn>,
    pub winner: Option<Winner>,
}

/// Number of most recent lines kept in the transcript
pub const TRANSCRIPT_CAPACITY: usize = 100;

pub struct GameView<N, S> {
    navigator: N,
    preferences: Preferences<S>,
    clock: Box<dyn Clock>,
    route: Route,
    status: GameStatus,
    transcript: VecDeque<String>,
    unrendered: Vec<String>,
}

impl<N: Navigator, S: PreferenceStore> GameView<N, S> {
    pub fn new(navigator: N, preferences: Preferences<S>, clock: Box<dyn Clock>) -> Self {
        Self {
            navigator,
            preferences,
            clock,
            route: Route::Home,
            status: GameStatus::default(),
            transcript: VecDeque::with_capacity(TRANSCRIPT_CAPACITY),
            unrendered: Vec::new(),
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn preferences(&self) -> &Preferences<S> {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences<S> {
        &mut self.preferences
    }

    /// The route the view is showing
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// The last [`TRANSCRIPT_CAPACITY`] rendered lines, oldest first
    pub fn transcript(&self) -> &VecDeque<String> {
        &self.transcript
    }

    /// Lines rendered since the previous call
    pub fn take_unrendered(&mut self) -> Vec<String> {
        std::mem::take(&mut self.unrendered)
    }

    fn go_to(&mut self, route: Route) {
        self.route = route.clone();
        self.navigator.navigate(route);
    }

    /// Append a line to the transcript
    pub fn notice(&mut self, line: impl Into<String>) {
        let line = line.into();
        if self.transcript.len() == TRANSCRIPT_CAPACITY {
            self.transcript.pop_front();
        }
        self.transcript.push_back(line.clone());
        self.unrendered.push(line);
    }

    /// Leave the current game on the client side: clear the flag and go home
    pub fn leave(&mut self) {
        if let Err(e) = self.preferences.set_game_left() {
            tracing::warn!("Failed to store in-game flag: {}", e);
        }
        self.status = GameStatus::default();
        self.go_to(Route::Home);
        self.notice("Left the game");
    }
}

impl<N: Navigator, S: PreferenceStore> GameEventHandler for GameView<N, S> {
    fn on_redirect(&mut self, game_id: &GameId) {
        tracing::info!("Redirected to game {}", game_id);
        self.go_to(Route::Game(game_id.clone()));
        if let Err(e) = self.preferences.enter_game() {
            tracing::warn!("Failed to store in-game flag: {}", e);
        }
        self.status = GameStatus {
            game_id: Some(game_id.clone()),
            ..GameStatus::default()
        };
        let line = MessageFormatter::format_redirect(game_id, self.clock.now_millis());
        self.notice(line);
    }

    fn on_begin(&mut self, countdown: Countdown) {
        tracing::info!("Game starting in {}", countdown);
        self.status.countdown = Some(countdown);
        let line = MessageFormatter::format_begin(countdown, self.clock.now_millis());
        self.notice(line);
    }

    fn on_turn(&mut self, turn: Turn) {
        tracing::info!("Turn: {:?}", turn);
        self.status.turn = Some(turn);
        let line = MessageFormatter::format_turn(turn, self.clock.now_millis());
        self.notice(line);
    }

    fn on_win(&mut self, winner: Winner) {
        tracing::info!("Game over, winner: {:?}", winner);
        self.status.winner = Some(winner);
        self.status.turn = None;
        let line = MessageFormatter::format_win(winner, self.clock.now_millis());
        self.notice(line);
    }
}
