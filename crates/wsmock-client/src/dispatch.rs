//! Inbound message dispatch.
//!
//! Routes decoded envelopes to type-specific handling: `error` raises a
//! failure notification, `bulk_msg` lands in the table view, anything else
//! is ignored on purpose. The dispatcher owns the rolling log and both
//! sinks, so no state lives outside it.

use serde_json::Value;
use tracing::{debug, warn};

use wsmock_protocol::{
    BulkMessage, Envelope, ErrorMessage, MSG_BULK, MSG_ERROR, decode_frame, split_frames,
};

use crate::logbuf::LogBuffer;
use crate::render::{display_value, sanitize_text};
use crate::sink::{NotificationSink, PresentationSink};

/// Separator line emitted after every handled message.
const SEPARATOR: &str = "===================";

/// Routes decoded envelopes and keeps the rolling message log.
pub struct Dispatcher<P, N> {
    log: LogBuffer,
    presentation: P,
    notifier: N,
}

impl<P: PresentationSink, N: NotificationSink> Dispatcher<P, N> {
    /// Creates a dispatcher over the given log buffer and sinks.
    pub fn new(log: LogBuffer, presentation: P, notifier: N) -> Self {
        Self {
            log,
            presentation,
            notifier,
        }
    }

    /// Splits a raw payload into frames and dispatches each decoded
    /// envelope in split order.
    ///
    /// A frame that fails to decode is logged and skipped; its siblings
    /// still dispatch.
    pub fn handle_payload(&mut self, payload: &str) {
        debug!(len = payload.len(), "received message payload");
        for frame in split_frames(payload) {
            match decode_frame(frame) {
                Ok(envelope) => self.handle(&envelope),
                Err(e) => warn!(error = %e, frame, "dropping undecodable frame"),
            }
        }
    }

    /// Handles one decoded envelope.
    pub fn handle(&mut self, envelope: &Envelope) {
        if self.log.begin_message() {
            self.presentation.clear_log();
            self.presentation.clear_table();
        }

        self.log_line(&format!("Message type received: {}", envelope.kind));

        match envelope.kind.as_str() {
            MSG_ERROR => {
                let error: ErrorMessage = envelope.payload();
                self.notifier.notify_error(&error.message);
            }
            MSG_BULK => {
                let bulk: BulkMessage = envelope.payload();
                self.notifier.notify_success("BULK success");
                self.presentation
                    .append_row(&bulk.sender, &bulk.receiver, &sanitize_text(&bulk.text));
                self.log_data(&envelope.data);
            }
            // unrecognized types are ignored on purpose; the type line and
            // separator still fire
            other => debug!(kind = other, "ignoring unrecognized message type"),
        }

        self.log_line(SEPARATOR);
    }

    /// Appends a line to the log and mirrors it to the presentation view.
    fn log_line(&mut self, line: &str) {
        self.log.append(line);
        self.presentation.append_log_line(line);
        self.presentation.scroll_to_bottom();
    }

    /// Logs each key/value pair of `data` in insertion order.
    fn log_data(&mut self, data: &Value) {
        if let Some(record) = data.as_object() {
            for (key, value) in record {
                self.log_line(&format!("{}: {}", key, display_value(value)));
            }
        }
    }

    /// The rolling log.
    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    /// The presentation sink.
    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    /// The notification sink.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mutable access to the notification sink, for lifecycle events that
    /// originate outside the dispatch pipeline.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Mutable access to the presentation sink.
    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }
}
