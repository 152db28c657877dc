//! CLI, WebSocket harness, dispatch and rendering.
//!
//! This crate provides the `wsmock` command-line harness: it dials a
//! newline-delimited JSON WebSocket endpoint, lets an operator compose and
//! send typed messages, and renders incoming messages by type through
//! pluggable presentation and notification sinks.

pub mod cli;
pub mod config;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod logbuf;
pub mod render;
pub mod session;
pub mod sink;

pub use cli::Cli;
pub use config::ClientConfig;
pub use connection::{Connection, ConnectionState, TransportEvent};
pub use dispatch::Dispatcher;
pub use error::{ClientError, ClientResult};
pub use logbuf::{DEFAULT_RESET_THRESHOLD, LogBuffer};
pub use session::Session;
pub use sink::{ConsoleSink, MemorySink, NotificationSink, PresentationSink, ToastSink};
