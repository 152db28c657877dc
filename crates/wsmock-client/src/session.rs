//! Interactive harness session.
//!
//! One cooperative loop multiplexes operator commands from stdin with
//! transport events, so dispatcher state never needs locking. Frames from
//! one payload always dispatch in split order before the next event is
//! polled.

use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use url::Url;

use wsmock_protocol::{BulkMessage, Envelope, MSG_BULK};

use crate::connection::{Connection, ConnectionState, TransportEvent};
use crate::dispatch::Dispatcher;
use crate::error::{ClientError, ClientResult};
use crate::sink::{NotificationSink, PresentationSink};

/// Outcome of one turn of the session loop.
enum Step {
    Command(String),
    Event(TransportEvent),
    ConnectionGone,
    Eof,
}

/// Drives one connection and the dispatch pipeline from operator input.
pub struct Session<P, N> {
    dispatcher: Dispatcher<P, N>,
    connection: Option<Connection>,
    timeout: Duration,
}

impl<P: PresentationSink, N: NotificationSink> Session<P, N> {
    /// Creates a session with no connection dialed yet.
    pub fn new(dispatcher: Dispatcher<P, N>, timeout: Duration) -> Self {
        Self {
            dispatcher,
            connection: None,
            timeout,
        }
    }

    /// Current connection state; `Idle` when nothing has been dialed yet.
    pub fn state(&self) -> ConnectionState {
        self.connection
            .as_ref()
            .map_or(ConnectionState::Idle, Connection::state)
    }

    /// Opens a connection to `url`, closing any previous one first so no
    /// socket handle is left dangling.
    pub fn connect(&mut self, url: &str) {
        if let Some(mut previous) = self.connection.take() {
            debug!(url = previous.url(), "superseding previous connection");
            previous.close();
        }
        self.connection = Some(Connection::open(url, self.timeout));
    }

    /// Sends a typed envelope over the current connection.
    pub fn send(&mut self, kind: &str, data: Value) -> ClientResult<()> {
        match self.connection.as_mut() {
            Some(connection) => connection.send(kind, data),
            None => Err(ClientError::NotConnected),
        }
    }

    /// Sends an already-built envelope over the current connection.
    pub fn send_envelope(&mut self, envelope: &Envelope) -> ClientResult<()> {
        match self.connection.as_mut() {
            Some(connection) => connection.send_envelope(envelope),
            None => Err(ClientError::NotConnected),
        }
    }

    /// Runs the interactive loop until stdin closes or the operator quits.
    pub async fn run(&mut self) -> ClientResult<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            let step = tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => Step::Command(line),
                    None => Step::Eof,
                },
                event = next_connection_event(&mut self.connection) => match event {
                    Some(event) => Step::Event(event),
                    None => Step::ConnectionGone,
                },
            };

            match step {
                Step::Command(line) => {
                    if !self.handle_command(line.trim()) {
                        break;
                    }
                }
                Step::Event(event) => self.handle_event(event),
                Step::ConnectionGone => self.connection = None,
                Step::Eof => break,
            }
        }

        Ok(())
    }

    /// Executes one operator command; returns false when the session should
    /// end.
    fn handle_command(&mut self, line: &str) -> bool {
        if line.is_empty() {
            return true;
        }

        let mut parts = line.splitn(2, ' ');
        let command = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or("").trim();

        match command {
            "open" | "connect" => self.command_open(rest),
            "send" => self.command_send(rest),
            "bulk" => self.command_bulk(rest),
            "status" => {
                let state = self.state();
                let url = self
                    .connection
                    .as_ref()
                    .map(Connection::url)
                    .unwrap_or("-")
                    .to_string();
                self.dispatcher
                    .presentation_mut()
                    .append_log_line(&format!("state: {:?}, url: {}", state, url));
            }
            "help" => {
                for line in [
                    "open <url>                     dial a WebSocket endpoint",
                    "send <type> [json]             send a typed envelope",
                    "bulk <sender> <receiver> <text> send a bulk_msg",
                    "status                         show connection state",
                    "quit                           leave the session",
                ] {
                    self.dispatcher.presentation_mut().append_log_line(line);
                }
            }
            "quit" | "exit" => return false,
            other => {
                self.dispatcher
                    .notifier_mut()
                    .notify_error(&format!("unknown command: {}", other));
            }
        }

        true
    }

    fn command_open(&mut self, rest: &str) {
        if rest.is_empty() {
            self.dispatcher
                .notifier_mut()
                .notify_error("usage: open <url>");
            return;
        }
        match Url::parse(rest) {
            Ok(url) => self.connect(url.as_str()),
            Err(e) => {
                self.dispatcher
                    .notifier_mut()
                    .notify_error(&format!("invalid url: {}", e));
            }
        }
    }

    fn command_send(&mut self, rest: &str) {
        let mut parts = rest.splitn(2, ' ');
        let kind = parts.next().unwrap_or_default();
        if kind.is_empty() {
            self.dispatcher
                .notifier_mut()
                .notify_error("usage: send <type> [json]");
            return;
        }

        let raw = parts.next().unwrap_or("").trim();
        let data = if raw.is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(raw) {
                Ok(value) => value,
                Err(e) => {
                    self.dispatcher
                        .notifier_mut()
                        .notify_error(&format!("invalid json payload: {}", e));
                    return;
                }
            }
        };

        if let Err(e) = self.send(kind, data) {
            self.dispatcher.notifier_mut().notify_error(&e.to_string());
        }
    }

    fn command_bulk(&mut self, rest: &str) {
        let mut parts = rest.splitn(3, ' ');
        let (sender, receiver, text) = match (parts.next(), parts.next(), parts.next()) {
            (Some(sender), Some(receiver), Some(text)) if !sender.is_empty() => {
                (sender, receiver, text)
            }
            _ => {
                self.dispatcher
                    .notifier_mut()
                    .notify_error("usage: bulk <sender> <receiver> <text>");
                return;
            }
        };

        let bulk = BulkMessage::new(sender, receiver, text);
        let result = Envelope::from_payload(MSG_BULK, &bulk)
            .map_err(ClientError::from)
            .and_then(|envelope| self.send_envelope(&envelope));
        if let Err(e) = result {
            self.dispatcher.notifier_mut().notify_error(&e.to_string());
        }
    }

    /// Reacts to one transport event.
    fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Opened => {
                debug!("connection established");
                self.dispatcher
                    .notifier_mut()
                    .notify_success("WS Mock server connected!");
            }
            TransportEvent::Message(payload) => self.dispatcher.handle_payload(&payload),
            TransportEvent::Errored(reason) => {
                warn!(reason = %reason, "transport error");
                self.dispatcher
                    .notifier_mut()
                    .notify_error(&format!("WS Mock server error: {}", reason));
            }
            TransportEvent::Closed => {
                self.dispatcher
                    .notifier_mut()
                    .notify_error("WS Mock server disconnected");
                self.connection = None;
            }
        }
    }

    /// The dispatcher, for inspection.
    pub fn dispatcher(&self) -> &Dispatcher<P, N> {
        &self.dispatcher
    }
}

/// Polls the current connection for its next event; pends forever when no
/// connection exists, so the stdin arm keeps the loop alive.
async fn next_connection_event(connection: &mut Option<Connection>) -> Option<TransportEvent> {
    match connection.as_mut() {
        Some(connection) => connection.next_event().await,
        None => std::future::pending().await,
    }
}
