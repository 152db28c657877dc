//! Envelope and message payload types for the wsmock protocol.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{ProtocolError, ProtocolResult};

/// Message envelope wrapping every frame on the wire.
///
/// Inbound frames decode into this shape; outbound messages are built from
/// it. `data` stays untyped here; handlers interpret it per `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Message type discriminator (`"bulk_msg"`, `"error"`, ...).
    #[serde(rename = "type")]
    pub kind: String,

    /// Arbitrary structured payload; `null` when the peer omits it.
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// Creates an envelope with the given type and payload.
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    /// Creates an envelope by serializing a typed payload into `data`.
    pub fn from_payload<T: Serialize>(kind: impl Into<String>, payload: &T) -> ProtocolResult<Self> {
        let data = serde_json::to_value(payload).map_err(ProtocolError::Serialization)?;
        Ok(Self::new(kind, data))
    }

    /// Extracts a typed payload from `data`.
    ///
    /// Falls back to the payload's `Default` when `data` does not match the
    /// expected shape: missing or mistyped fields render as empty values
    /// rather than failing the frame.
    pub fn payload<T: DeserializeOwned + Default>(&self) -> T {
        serde_json::from_value(self.data.clone()).unwrap_or_default()
    }
}

/// Payload of a `bulk_msg` envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkMessage {
    /// Originating party.
    pub sender: String,

    /// Destination party.
    pub receiver: String,

    /// Free-form message body; may span multiple lines.
    pub text: String,
}

impl BulkMessage {
    /// Creates a new bulk message payload.
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            text: text.into(),
        }
    }
}

/// Payload of an `error` envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorMessage {
    /// Human-readable failure description from the peer.
    pub message: String,
}

impl ErrorMessage {
    /// Creates a new error payload.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_serde_shape() {
        let envelope = Envelope::new("bulk_msg", json!({"sender": "A"}));
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"type":"bulk_msg","data":{"sender":"A"}}"#);

        let parsed: Envelope = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn envelope_data_defaults_to_null() {
        let parsed: Envelope = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert_eq!(parsed.kind, "ping");
        assert!(parsed.data.is_null());
    }

    #[test]
    fn envelope_from_payload() {
        let envelope =
            Envelope::from_payload("bulk_msg", &BulkMessage::new("A", "B", "hi")).unwrap();
        assert_eq!(envelope.kind, "bulk_msg");
        assert_eq!(envelope.data["sender"], "A");
        assert_eq!(envelope.data["receiver"], "B");
        assert_eq!(envelope.data["text"], "hi");
    }

    #[test]
    fn bulk_payload_full() {
        let envelope = Envelope::new(
            "bulk_msg",
            json!({"sender": "A", "receiver": "B", "text": "hi"}),
        );
        let bulk: BulkMessage = envelope.payload();
        assert_eq!(bulk, BulkMessage::new("A", "B", "hi"));
    }

    #[test]
    fn bulk_payload_missing_fields_render_empty() {
        let envelope = Envelope::new("bulk_msg", json!({"sender": "A"}));
        let bulk: BulkMessage = envelope.payload();
        assert_eq!(bulk.sender, "A");
        assert_eq!(bulk.receiver, "");
        assert_eq!(bulk.text, "");
    }

    #[test]
    fn bulk_payload_non_object_data_renders_empty() {
        let envelope = Envelope::new("bulk_msg", json!(42));
        let bulk: BulkMessage = envelope.payload();
        assert_eq!(bulk, BulkMessage::default());
    }

    #[test]
    fn error_payload_message() {
        let envelope = Envelope::new("error", json!({"message": "boom"}));
        let error: ErrorMessage = envelope.payload();
        assert_eq!(error.message, "boom");
    }

    #[test]
    fn error_payload_missing_message_renders_empty() {
        let envelope = Envelope::new("error", json!({}));
        let error: ErrorMessage = envelope.payload();
        assert_eq!(error.message, "");
    }
}
