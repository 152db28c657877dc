//! Protocol error types.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors that can occur while encoding or decoding frames.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Blank line between frames; carries no envelope.
    #[error("empty frame")]
    EmptyFrame,

    /// Frame is not a valid envelope: bad JSON, or `type` missing or not a
    /// string.
    #[error("malformed frame: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Failed to serialize an outbound envelope.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}
