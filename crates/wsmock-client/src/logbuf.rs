//! Rolling, size-bounded message log.
//!
//! The buffer holds every rendered log line and clears itself once the
//! inbound message count passes a configurable threshold, bounding memory
//! growth during long capture sessions.

/// Default number of messages after which the log clears itself.
pub const DEFAULT_RESET_THRESHOLD: usize = 50;

/// Append-mostly line store owned by the dispatcher.
#[derive(Debug)]
pub struct LogBuffer {
    entries: Vec<String>,
    message_count: usize,
    reset_threshold: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_THRESHOLD)
    }
}

impl LogBuffer {
    /// Creates a buffer that resets after `reset_threshold` messages.
    pub fn new(reset_threshold: usize) -> Self {
        Self {
            entries: Vec::new(),
            message_count: 0,
            reset_threshold,
        }
    }

    /// Records one inbound message against the reset threshold.
    ///
    /// Increments the message count; once it exceeds the threshold the
    /// buffer clears and the count restarts at 1, so the triggering message
    /// logs into a fresh buffer. Returns true when a reset happened.
    pub fn begin_message(&mut self) -> bool {
        self.message_count += 1;
        if self.message_count > self.reset_threshold {
            self.entries.clear();
            self.message_count = 1;
            return true;
        }
        false
    }

    /// Appends one rendered line.
    pub fn append(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
    }

    /// Clears all entries and the message count.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.message_count = 0;
    }

    /// Number of messages recorded since the last reset.
    pub fn message_count(&self) -> usize {
        self.message_count
    }

    /// Threshold at which the buffer resets.
    pub fn reset_threshold(&self) -> usize {
        self.reset_threshold
    }

    /// All lines recorded since the last reset, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_increases_up_to_threshold() {
        let mut log = LogBuffer::new(50);
        for k in 1..=50 {
            assert!(!log.begin_message());
            assert_eq!(log.message_count(), k);
            log.append(format!("line {}", k));
        }
        assert_eq!(log.entries().len(), 50);
    }

    #[test]
    fn message_past_threshold_resets_before_logging() {
        let mut log = LogBuffer::new(50);
        for k in 1..=50 {
            log.begin_message();
            log.append(format!("line {}", k));
        }

        // the 51st message sees a cleared buffer and counts as the first
        assert!(log.begin_message());
        assert_eq!(log.message_count(), 1);
        assert!(log.entries().is_empty());

        log.append("line 51");
        assert_eq!(log.entries(), ["line 51".to_string()]);
    }

    #[test]
    fn reset_clears_entries_and_count() {
        let mut log = LogBuffer::new(50);
        log.begin_message();
        log.append("line");
        log.reset();
        assert_eq!(log.message_count(), 0);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn default_threshold() {
        assert_eq!(LogBuffer::default().reset_threshold(), 50);
    }
}
