//! Newline-delimited framing for the wsmock wire protocol.
//!
//! A single inbound payload may carry several frames concatenated with line
//! breaks; each frame is one JSON envelope:
//!
//! ```text
//! {"type":"bulk_msg","data":{...}}\n{"type":"error","data":{...}}
//! ```
//!
//! Outbound messages are always a single frame with no trailing delimiter.

use crate::error::{ProtocolError, ProtocolResult};
use crate::types::Envelope;

/// Splits a raw inbound payload into discrete frames.
///
/// Splits on `\n`, `\r` and `\r\n` (a CRLF pair counts as one delimiter),
/// preserving order and dropping no content. Blank lines survive as empty
/// frames; [`decode_frame`] rejects those, so callers keep processing the
/// siblings.
pub fn split_frames(payload: &str) -> Vec<&str> {
    let bytes = payload.as_bytes();
    let mut frames = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                frames.push(&payload[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                frames.push(&payload[start..i]);
                i += 1;
                if i < bytes.len() && bytes[i] == b'\n' {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }

    frames.push(&payload[start..]);
    frames
}

/// Decodes a single frame into an [`Envelope`].
///
/// Fails with [`ProtocolError::EmptyFrame`] for blank frames and with
/// [`ProtocolError::Malformed`] when the frame is not valid JSON or its
/// `type` field is missing or not a string. A failure here must never abort
/// the processing of sibling frames from the same payload.
pub fn decode_frame(frame: &str) -> ProtocolResult<Envelope> {
    if frame.trim().is_empty() {
        return Err(ProtocolError::EmptyFrame);
    }
    serde_json::from_str(frame).map_err(ProtocolError::Malformed)
}

/// Serializes an envelope to a single JSON text frame.
pub fn encode_envelope(envelope: &Envelope) -> ProtocolResult<String> {
    serde_json::to_string(envelope).map_err(ProtocolError::Serialization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_single_frame() {
        assert_eq!(split_frames("abc"), vec!["abc"]);
    }

    #[test]
    fn split_preserves_order() {
        assert_eq!(split_frames("a\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn split_handles_all_line_break_kinds() {
        assert_eq!(split_frames("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn split_keeps_empty_frames() {
        assert_eq!(split_frames("a\n\nb\n"), vec!["a", "", "b", ""]);
    }

    #[test]
    fn split_empty_payload() {
        assert_eq!(split_frames(""), vec![""]);
    }

    #[test]
    fn decode_valid_frame() {
        let envelope = decode_frame(r#"{"type":"bulk_msg","data":{"sender":"A"}}"#).unwrap();
        assert_eq!(envelope.kind, "bulk_msg");
        assert_eq!(envelope.data["sender"], "A");
    }

    #[test]
    fn decode_empty_frame() {
        assert!(matches!(decode_frame(""), Err(ProtocolError::EmptyFrame)));
        assert!(matches!(
            decode_frame("   "),
            Err(ProtocolError::EmptyFrame)
        ));
    }

    #[test]
    fn decode_invalid_json() {
        assert!(matches!(
            decode_frame("{not json"),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn decode_missing_type() {
        assert!(matches!(
            decode_frame(r#"{"data":{}}"#),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn decode_non_string_type() {
        assert!(matches!(
            decode_frame(r#"{"type":42,"data":{}}"#),
            Err(ProtocolError::Malformed(_))
        ));
    }

    #[test]
    fn decode_failure_is_isolated_per_frame() {
        let frames = split_frames("{bad\n{\"type\":\"ok\"}");
        assert!(decode_frame(frames[0]).is_err());
        let envelope = decode_frame(frames[1]).unwrap();
        assert_eq!(envelope.kind, "ok");
    }

    #[test]
    fn encode_single_text_frame() {
        let envelope = Envelope::new("bulk_msg", json!({"sender": "A"}));
        let frame = encode_envelope(&envelope).unwrap();
        assert_eq!(frame, r#"{"type":"bulk_msg","data":{"sender":"A"}}"#);
        assert!(!frame.contains('\n'));
    }
}
