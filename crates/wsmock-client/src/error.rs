//! Client error types.

use std::fmt;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// `send` was called while the connection is not open.
    NotConnected,
    /// Connection-level transport failure.
    Transport(String),
    /// Wire protocol error (framing, encoding).
    Protocol(wsmock_protocol::ProtocolError),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::NotConnected => write!(f, "not connected: send requires an open connection"),
            Self::Transport(msg) => write!(f, "transport error: {}", msg),
            Self::Protocol(err) => write!(f, "protocol error: {}", err),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Protocol(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<wsmock_protocol::ProtocolError> for ClientError {
    fn from(err: wsmock_protocol::ProtocolError) -> Self {
        Self::Protocol(err)
    }
}
