//! Game client session: one connection, one event loop.
//!
//! The loop owns the [`ConnectionManager`] and the [`GameView`]; transport
//! events and typed lines are handled one at a time, so no state is shared
//! between tasks.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{mpsc, watch};

use gameroom_shared::time::SystemClock;

use crate::{
    actions,
    config::ClientConfig,
    connection::{CloseInfo, ConnectionEvent, ConnectionManager, ConnectionState},
    dispatcher::dispatch,
    domain::PlayerName,
    error::ClientError,
    formatter::MessageFormatter,
    input::UserInput,
    navigation::{HistoryNavigator, Navigator},
    preferences::{FilePreferenceStore, PreferenceStore, Preferences},
    ui::{PROMPT, print_lines},
    view::GameView,
};

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user asked to quit (or closed the input)
    UserQuit,
    /// The connection closed without being asked to
    ConnectionClosed(CloseInfo),
}

pub struct GameSession<N, S> {
    url: String,
    manager: ConnectionManager,
    events: mpsc::UnboundedReceiver<ConnectionEvent>,
    view: GameView<N, S>,
    echo: bool,
    quitting: bool,
}

impl<N: Navigator, S: PreferenceStore> GameSession<N, S> {
    pub fn new(url: impl Into<String>, view: GameView<N, S>) -> Self {
        let (manager, events) = ConnectionManager::new();
        Self {
            url: url.into(),
            manager,
            events,
            view,
            echo: false,
            quitting: false,
        }
    }

    /// Print rendered lines to stdout as they are produced
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn view(&self) -> &GameView<N, S> {
        &self.view
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.manager.state()
    }

    /// Subscribe to connection state changes
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.manager.subscribe()
    }

    /// Connect and run the event loop until the connection closes.
    ///
    /// `input` carries raw lines typed by the user. When it closes, the
    /// session closes the connection as if `/quit` had been typed.
    ///
    /// # Errors
    ///
    /// [`ClientError::AlreadyConnected`] if called while a connection is live.
    pub async fn run(
        &mut self,
        mut input: mpsc::UnboundedReceiver<String>,
    ) -> Result<SessionEnd, ClientError> {
        self.manager.connect(&self.url)?;
        self.quitting = false;
        let mut input_open = true;

        loop {
            tokio::select! {
                event = self.events.recv() => {
                    let Some(event) = event else {
                        // Unreachable while we hold the manager's sender
                        return Ok(SessionEnd::UserQuit);
                    };
                    if let Some(end) = self.handle_connection_event(event) {
                        self.flush();
                        return Ok(end);
                    }
                }
                line = input.recv(), if input_open => {
                    match line {
                        Some(line) => self.handle_line(&line),
                        None => {
                            input_open = false;
                            self.quit();
                        }
                    }
                }
            }
            self.flush();
        }
    }

    fn handle_connection_event(&mut self, event: ConnectionEvent) -> Option<SessionEnd> {
        let close_info = match &event {
            ConnectionEvent::Close(info) => Some(info.clone()),
            _ => None,
        };
        let opened = matches!(event, ConnectionEvent::Open);

        if let Some(text) = self.manager.handle_event(event) {
            dispatch(&text, &mut self.view);
        }

        if opened {
            self.on_connected();
        }

        let info = close_info?;
        self.view.notice(MessageFormatter::format_closed(&info));
        if self.quitting {
            Some(SessionEnd::UserQuit)
        } else {
            Some(SessionEnd::ConnectionClosed(info))
        }
    }

    /// Greet the user and re-send a stored name so the server knows who we are
    fn on_connected(&mut self) {
        let stored = self.view.preferences().name();
        self.view
            .notice(MessageFormatter::format_connected(stored.as_deref()));

        let Some(stored) = stored else {
            return;
        };
        match PlayerName::new(stored) {
            Ok(name) => {
                if let Err(e) = actions::send_name(&self.manager, &name) {
                    tracing::warn!("Failed to send stored name: {}", e);
                }
            }
            Err(e) => tracing::warn!("Ignoring stored name: {}", e),
        }
    }

    fn handle_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        let input = match UserInput::parse(line) {
            Ok(input) => input,
            Err(e) => {
                self.view.notice(e.to_string());
                return;
            }
        };

        let result = match input {
            UserInput::Create => actions::create_game(&self.manager),
            UserInput::Join(game_id) => actions::join_game(&self.manager, &game_id),
            UserInput::Name(name) => self.set_name(&name),
            UserInput::Leave => {
                self.view.leave();
                Ok(())
            }
            UserInput::Status => {
                let preferences = self.view.preferences();
                let status = MessageFormatter::format_status(
                    self.manager.state(),
                    self.view.route(),
                    preferences.name().as_deref(),
                    preferences.in_game(),
                );
                self.view.notice(status);
                Ok(())
            }
            UserInput::Help => {
                self.view.notice(MessageFormatter::format_help());
                Ok(())
            }
            UserInput::Quit => {
                self.quit();
                Ok(())
            }
        };

        if let Err(e) = result {
            self.view.notice(e.to_string());
        }
    }

    fn set_name(&mut self, name: &PlayerName) -> Result<(), ClientError> {
        self.view.preferences_mut().set_name(name.as_str())?;
        actions::send_name(&self.manager, name)
    }

    fn quit(&mut self) {
        self.quitting = true;
        self.manager.close();
    }

    fn flush(&mut self) {
        let lines = self.view.take_unrendered();
        if self.echo {
            print_lines(&lines);
        }
    }
}

/// Read lines with rustyline on a dedicated thread and forward them.
///
/// The thread ends on Ctrl+C, Ctrl+D, or once the receiver is dropped,
/// which closes the channel.
fn spawn_line_reader() -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

/// Run one interactive session against `config.url`
pub async fn run_client_session(config: &ClientConfig) -> Result<SessionEnd, ClientError> {
    let preferences_path = config.resolved_preferences_path();
    let store = FilePreferenceStore::open(preferences_path);
    let view = GameView::new(
        HistoryNavigator::new(),
        Preferences::new(store),
        Box::new(SystemClock),
    );

    let mut session = GameSession::new(config.url.clone(), view).with_echo(true);
    let input = spawn_line_reader();
    session.run(input).await
}
