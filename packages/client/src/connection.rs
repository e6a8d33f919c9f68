//! Connection manager: owns the single WebSocket connection to the game server.
//!
//! The socket itself lives in a transport task spawned by [`ConnectionManager::connect`].
//! That task only moves frames: outbound text arrives over a channel, inbound
//! frames and lifecycle changes leave as [`ConnectionEvent`]s. All state
//! transitions happen in [`ConnectionManager::handle_event`], on the task that
//! owns the manager.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        Utf8Bytes,
        protocol::{CloseFrame, Message, frame::coding::CloseCode},
    },
};

use crate::error::ClientError;

/// Close code reported when the connection drops without a close frame.
pub const ABNORMAL_CLOSURE: u16 = 1006;

/// Close code for a normal, client-initiated close.
pub const NORMAL_CLOSURE: u16 = 1000;

/// Lifecycle state of the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// `connect` has never been called
    #[default]
    Idle,
    /// Handshake in progress
    Connecting,
    /// Handshake completed; frames can be sent
    Open,
    /// Connection closed after having been open
    Closed,
    /// Connection closed without ever opening
    Errored,
}

impl ConnectionState {
    /// The connected flag: true iff the connection is open
    pub fn is_connected(self) -> bool {
        matches!(self, ConnectionState::Open)
    }

    fn is_live(self) -> bool {
        matches!(self, ConnectionState::Connecting | ConnectionState::Open)
    }
}

/// Details of a close event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseInfo {
    pub was_clean: bool,
    pub code: u16,
    pub reason: String,
}

impl CloseInfo {
    /// Close without a close frame (network down, server killed, handshake failed)
    pub fn abnormal() -> Self {
        Self {
            was_clean: false,
            code: ABNORMAL_CLOSURE,
            reason: String::new(),
        }
    }
}

impl From<Option<CloseFrame>> for CloseInfo {
    fn from(frame: Option<CloseFrame>) -> Self {
        match frame {
            Some(frame) => Self {
                was_clean: true,
                code: u16::from(frame.code),
                reason: frame.reason.as_str().to_string(),
            },
            // A close frame without a body is still a clean close
            None => Self {
                was_clean: true,
                code: NORMAL_CLOSURE,
                reason: String::new(),
            },
        }
    }
}

/// Events emitted by the transport task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Open,
    Message(String),
    Close(CloseInfo),
    Error(String),
}

/// Requests from the manager to the transport task
#[derive(Debug)]
enum Outbound {
    Text(String),
    Close,
}

/// Owner of the one connection per client session.
///
/// Exposes the connected flag both as a getter and as a `watch` subscription,
/// so a UI can either poll or await changes.
pub struct ConnectionManager {
    state: watch::Sender<ConnectionState>,
    events_tx: mpsc::UnboundedSender<ConnectionEvent>,
    outbound_tx: Option<mpsc::UnboundedSender<Outbound>>,
    last_error: Option<String>,
}

impl ConnectionManager {
    /// Create a manager in the `Idle` state together with the receiver for its events.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ConnectionEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(ConnectionState::Idle);
        let manager = Self {
            state,
            events_tx,
            outbound_tx: None,
            last_error: None,
        };
        (manager, events_rx)
    }

    /// Current lifecycle state
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// The connected flag
    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// The most recent transport error, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start connecting to `url`.
    ///
    /// Returns immediately. An unreachable server is not an error here: it is
    /// reported later as an `Error` event followed by an abnormal `Close`.
    ///
    /// # Errors
    ///
    /// [`ClientError::AlreadyConnected`] if a connection is connecting or open.
    pub fn connect(&mut self, url: &str) -> Result<(), ClientError> {
        if self.state().is_live() {
            return Err(ClientError::AlreadyConnected);
        }

        tracing::info!("[connecting] {}", url);
        self.set_state(ConnectionState::Connecting);
        self.last_error = None;

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        self.outbound_tx = Some(outbound_tx);
        tokio::spawn(transport_loop(
            url.to_string(),
            outbound_rx,
            self.events_tx.clone(),
        ));

        Ok(())
    }

    /// Apply one transport event.
    ///
    /// Returns the text of `Message` events so the caller can dispatch it.
    pub fn handle_event(&mut self, event: ConnectionEvent) -> Option<String> {
        match event {
            ConnectionEvent::Open => {
                self.on_open();
                None
            }
            ConnectionEvent::Message(text) => {
                tracing::debug!("[message] Data received from server: {}", text);
                Some(text)
            }
            ConnectionEvent::Close(info) => {
                self.on_close(info);
                None
            }
            ConnectionEvent::Error(error) => {
                self.on_error(error);
                None
            }
        }
    }

    /// Lifecycle callback: the handshake completed
    pub fn on_open(&mut self) {
        tracing::info!("[open] Connection established");
        self.set_state(ConnectionState::Open);
    }

    /// Lifecycle callback: the connection closed. No reconnection is attempted.
    pub fn on_close(&mut self, info: CloseInfo) {
        if info.was_clean {
            tracing::info!(
                "[close] Connection closed cleanly, code={} reason={}",
                info.code,
                info.reason
            );
        } else {
            tracing::warn!("[close] Connection died, code={}", info.code);
        }

        let next = if self.state() == ConnectionState::Connecting {
            ConnectionState::Errored
        } else {
            ConnectionState::Closed
        };
        self.outbound_tx = None;
        self.set_state(next);
    }

    /// Lifecycle callback: a transport error. Logged only.
    pub fn on_error(&mut self, error: String) {
        tracing::error!("[error] {}", error);
        self.last_error = Some(error);
    }

    /// Send one text frame.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotConnected`] unless the connection is open.
    pub fn send(&self, text: &str) -> Result<(), ClientError> {
        if !self.is_connected() {
            return Err(ClientError::NotConnected);
        }
        let outbound_tx = self.outbound_tx.as_ref().ok_or(ClientError::NotConnected)?;
        outbound_tx
            .send(Outbound::Text(text.to_string()))
            .map_err(|_| ClientError::NotConnected)?;
        tracing::debug!("[send] {}", text);
        Ok(())
    }

    /// Ask the transport task to close the connection with a normal close frame.
    ///
    /// The state changes once the resulting `Close` event is handled.
    pub fn close(&self) {
        if let Some(outbound_tx) = &self.outbound_tx
            && outbound_tx.send(Outbound::Close).is_ok()
        {
            tracing::info!("[close] Closing connection");
        }
    }

    fn set_state(&self, next: ConnectionState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            tracing::debug!("Connection state: {:?} -> {:?}", previous, next);
        }
    }
}

/// Move frames between the socket and the manager's channels until either side ends.
async fn transport_loop(
    url: String,
    mut outbound_rx: mpsc::UnboundedReceiver<Outbound>,
    events_tx: mpsc::UnboundedSender<ConnectionEvent>,
) {
    let emit = |event: ConnectionEvent| {
        if events_tx.send(event).is_err() {
            tracing::debug!("Event channel closed, receiver dropped");
        }
    };

    let ws_stream = match connect_async(url.as_str()).await {
        Ok((ws_stream, _response)) => ws_stream,
        Err(e) => {
            emit(ConnectionEvent::Error(e.to_string()));
            emit(ConnectionEvent::Close(CloseInfo::abnormal()));
            return;
        }
    };
    emit(ConnectionEvent::Open);

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            outbound = outbound_rx.recv() => {
                match outbound {
                    Some(Outbound::Text(text)) => {
                        if let Err(e) = write.send(Message::Text(text.into())).await {
                            emit(ConnectionEvent::Error(e.to_string()));
                            emit(ConnectionEvent::Close(CloseInfo::abnormal()));
                            break;
                        }
                    }
                    Some(Outbound::Close) | None => {
                        let frame = CloseFrame {
                            code: CloseCode::Normal,
                            reason: Utf8Bytes::from_static(""),
                        };
                        if let Err(e) = write.send(Message::Close(Some(frame))).await {
                            tracing::debug!("Failed to send close frame: {}", e);
                        }
                        emit(ConnectionEvent::Close(CloseInfo {
                            was_clean: true,
                            code: NORMAL_CLOSURE,
                            reason: String::new(),
                        }));
                        break;
                    }
                }
            }
            incoming = read.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        emit(ConnectionEvent::Message(text.as_str().to_string()));
                    }
                    Some(Ok(Message::Binary(data))) => {
                        tracing::debug!("Ignoring {} bytes of binary data", data.len());
                    }
                    Some(Ok(Message::Close(frame))) => {
                        emit(ConnectionEvent::Close(CloseInfo::from(frame)));
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        emit(ConnectionEvent::Error(e.to_string()));
                        emit(ConnectionEvent::Close(CloseInfo::abnormal()));
                        break;
                    }
                    None => {
                        emit(ConnectionEvent::Close(CloseInfo::abnormal()));
                        break;
                    }
                }
            }
        }
    }

    tracing::debug!("Transport loop exited");
}
