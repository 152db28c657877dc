//! WebSocket transport connection.
//!
//! Owns one connection to the peer: a spawned I/O task dials the endpoint
//! and pumps the socket, reporting lifecycle transitions over an event
//! channel; `send` writes single-frame envelopes. Exactly one connection is
//! meant to be live at a time: the session closes any previous connection
//! before opening a new one, so no socket handle is left dangling.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use wsmock_protocol::{Envelope, encode_envelope};

use crate::error::{ClientError, ClientResult};

/// Lifecycle phases of a [`Connection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection has been dialed yet.
    Idle,
    /// Dialing the endpoint; neither `Opened` nor `Errored` seen so far.
    Connecting,
    /// Established; `send` is legal.
    Open,
    /// Finished, normally or after an error.
    Closed,
    /// Transport fault observed; `Closed` follows.
    Errored,
}

/// Transition notifications from the I/O task.
///
/// Exactly one of `Opened`/`Errored` follows a connect attempt, `Closed`
/// arrives at most once, and no `Message` is delivered after `Closed` or
/// `Errored`.
#[derive(Debug)]
pub enum TransportEvent {
    /// Connection established.
    Opened,
    /// One raw text payload from the peer; may hold several frames.
    Message(String),
    /// Transport fault, at connect time or mid-session.
    Errored(String),
    /// Connection finished; no further events follow.
    Closed,
}

/// One WebSocket connection to the peer.
pub struct Connection {
    url: String,
    state: ConnectionState,
    events: mpsc::UnboundedReceiver<TransportEvent>,
    outbound: mpsc::UnboundedSender<Message>,
    io_task: JoinHandle<()>,
}

impl Connection {
    /// Dials `url` in the background.
    ///
    /// Never fails directly: connect errors (including an unparseable URL)
    /// surface as an `Errored` event followed by `Closed`.
    pub fn open(url: impl Into<String>, timeout: Duration) -> Self {
        let url = url.into();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let io_task = tokio::spawn(io_loop(url.clone(), timeout, event_tx, outbound_rx));

        Self {
            url,
            state: ConnectionState::Connecting,
            events: event_rx,
            outbound: outbound_tx,
            io_task,
        }
    }

    /// The endpoint this connection dialed.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Current state, as of the last event observed via [`next_event`].
    ///
    /// [`next_event`]: Connection::next_event
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// True while `send` is legal.
    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Serializes `{type, data}` to a single JSON text frame and writes it.
    ///
    /// Only legal while the connection is open; otherwise fails with
    /// [`ClientError::NotConnected`] without touching the socket.
    pub fn send(&mut self, kind: &str, data: Value) -> ClientResult<()> {
        self.send_envelope(&Envelope::new(kind, data))
    }

    /// Sends an already-built envelope; same open requirement as [`send`].
    ///
    /// [`send`]: Connection::send
    pub fn send_envelope(&mut self, envelope: &Envelope) -> ClientResult<()> {
        if !self.is_open() {
            return Err(ClientError::NotConnected);
        }

        let frame = encode_envelope(envelope)?;
        debug!(kind = %envelope.kind, "sending frame");
        self.outbound
            .send(Message::text(frame))
            .map_err(|_| ClientError::Transport("connection task is gone".to_string()))
    }

    /// Waits for the next transport event, tracking the state machine.
    ///
    /// Returns `None` once the connection has fully shut down.
    pub async fn next_event(&mut self) -> Option<TransportEvent> {
        let event = self.events.recv().await?;
        self.state = match event {
            TransportEvent::Opened => ConnectionState::Open,
            TransportEvent::Message(_) => self.state,
            TransportEvent::Errored(_) => ConnectionState::Errored,
            TransportEvent::Closed => ConnectionState::Closed,
        };
        Some(event)
    }

    /// Tears the connection down deterministically.
    pub fn close(&mut self) {
        debug!(url = %self.url, "closing connection");
        self.io_task.abort();
        self.state = ConnectionState::Closed;
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.io_task.abort();
    }
}

/// Single I/O task per connection: dials, then pumps the socket and the
/// outbound queue until either side finishes. All events for one connection
/// originate here, which is what guarantees their ordering.
async fn io_loop(
    url: String,
    timeout: Duration,
    events: mpsc::UnboundedSender<TransportEvent>,
    mut outbound: mpsc::UnboundedReceiver<Message>,
) {
    let stream = match tokio::time::timeout(timeout, connect_async(&url)).await {
        Ok(Ok((stream, _response))) => stream,
        Ok(Err(e)) => {
            let _ = events.send(TransportEvent::Errored(e.to_string()));
            let _ = events.send(TransportEvent::Closed);
            return;
        }
        Err(_) => {
            let _ = events.send(TransportEvent::Errored(format!(
                "connect timed out after {}s",
                timeout.as_secs()
            )));
            let _ = events.send(TransportEvent::Closed);
            return;
        }
    };

    debug!(url = %url, "connection established");
    let _ = events.send(TransportEvent::Opened);

    let (mut sink, mut source) = stream.split();

    loop {
        tokio::select! {
            incoming = source.next() => match incoming {
                Some(Ok(Message::Text(payload))) => {
                    if events.send(TransportEvent::Message(payload.to_string())).is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    let _ = events.send(TransportEvent::Closed);
                    break;
                }
                // binary, ping and pong frames are not part of the peer
                // protocol
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    let _ = events.send(TransportEvent::Errored(e.to_string()));
                    let _ = events.send(TransportEvent::Closed);
                    break;
                }
            },
            frame = outbound.recv() => match frame {
                Some(message) => {
                    if let Err(e) = sink.send(message).await {
                        let _ = events.send(TransportEvent::Errored(e.to_string()));
                        let _ = events.send(TransportEvent::Closed);
                        break;
                    }
                }
                None => {
                    let _ = sink.send(Message::Close(None)).await;
                    let _ = events.send(TransportEvent::Closed);
                    break;
                }
            },
        }
    }
}
