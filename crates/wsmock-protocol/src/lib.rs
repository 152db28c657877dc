//! Wire protocol for the wsmock harness.
//!
//! The peer speaks newline-delimited JSON over a single WebSocket
//! connection: each frame is one `{"type": ..., "data": ...}` envelope,
//! and several frames may arrive concatenated in one payload.
//!
//! # Example
//!
//! ```rust
//! use wsmock_protocol::{decode_frame, split_frames};
//!
//! let payload = "{\"type\":\"ping\"}\n{\"type\":\"pong\"}";
//! let frames = split_frames(payload);
//! assert_eq!(frames.len(), 2);
//! let envelope = decode_frame(frames[0]).unwrap();
//! assert_eq!(envelope.kind, "ping");
//! ```

mod error;
mod framing;
mod types;

pub use error::{ProtocolError, ProtocolResult};
pub use framing::{decode_frame, encode_envelope, split_frames};
pub use types::{BulkMessage, Envelope, ErrorMessage};

/// Message type rendered into the bulk table view.
pub const MSG_BULK: &str = "bulk_msg";

/// Message type carrying a peer-reported failure.
pub const MSG_ERROR: &str = "error";
