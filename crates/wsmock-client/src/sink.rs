//! Presentation and notification sinks.
//!
//! The harness renders through these traits instead of owning a UI. The
//! presentation sink receives rendered strings and table rows; the
//! notification sink receives severity-tagged one-liners.

use std::time::Duration;

use notify_rust::Notification;
#[cfg(target_os = "linux")]
use notify_rust::Urgency;
use tracing::{debug, error};

/// View for rendered output: a message log and a bulk-message table.
pub trait PresentationSink {
    /// Appends a table row for a bulk message; `html` is already sanitized.
    fn append_row(&mut self, sender: &str, receiver: &str, html: &str);

    /// Appends one line to the message log.
    fn append_log_line(&mut self, line: &str);

    /// Clears the message log.
    fn clear_log(&mut self);

    /// Clears the bulk-message table.
    fn clear_table(&mut self);

    /// Scrolls the log view to the newest entry.
    fn scroll_to_bottom(&mut self);
}

/// Receiver for success/error notifications.
pub trait NotificationSink {
    /// Reports a successful event.
    fn notify_success(&mut self, text: &str);

    /// Reports a failure.
    fn notify_error(&mut self, text: &str);
}

/// Renders log lines, table rows and notifications to the terminal.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl PresentationSink for ConsoleSink {
    fn append_row(&mut self, sender: &str, receiver: &str, html: &str) {
        println!("{} | {} | {}", sender, receiver, html);
    }

    fn append_log_line(&mut self, line: &str) {
        println!("{}", line);
    }

    fn clear_log(&mut self) {
        debug!("log view cleared");
    }

    fn clear_table(&mut self) {
        debug!("table view cleared");
    }

    fn scroll_to_bottom(&mut self) {
        // the terminal already follows the newest line
    }
}

impl NotificationSink for ConsoleSink {
    fn notify_success(&mut self, text: &str) {
        println!("[ok] {}", text);
    }

    fn notify_error(&mut self, text: &str) {
        eprintln!("[error] {}", text);
    }
}

/// Desktop toast notifications.
#[derive(Debug, Clone)]
pub struct ToastSink {
    app_name: String,
    timeout_secs: u32,
}

impl ToastSink {
    /// Creates a toast sink with a 10 second display timeout.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            timeout_secs: 10,
        }
    }

    /// Builder: set the display timeout.
    pub fn with_timeout(mut self, secs: u32) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn show(&self, summary: &str, body: &str, critical: bool) {
        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(summary)
            .body(body)
            .timeout(Duration::from_secs(self.timeout_secs as u64));

        #[cfg(target_os = "linux")]
        notification.urgency(if critical {
            Urgency::Critical
        } else {
            Urgency::Normal
        });

        if let Err(e) = notification.show() {
            error!(error = %e, "Failed to send notification");
        }
    }
}

impl NotificationSink for ToastSink {
    fn notify_success(&mut self, text: &str) {
        self.show("wsmock", text, false);
    }

    fn notify_error(&mut self, text: &str) {
        self.show("wsmock error", text, true);
    }
}

/// Recording sink for tests and embedding; keeps everything it receives.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Rows appended to the table, as `(sender, receiver, html)`.
    pub rows: Vec<(String, String, String)>,
    /// Lines appended to the log view.
    pub log_lines: Vec<String>,
    /// Number of `clear_log` calls.
    pub log_clears: usize,
    /// Number of `clear_table` calls.
    pub table_clears: usize,
    /// Number of `scroll_to_bottom` calls.
    pub scrolls: usize,
    /// Success notification texts.
    pub successes: Vec<String>,
    /// Error notification texts.
    pub errors: Vec<String>,
}

impl PresentationSink for MemorySink {
    fn append_row(&mut self, sender: &str, receiver: &str, html: &str) {
        self.rows
            .push((sender.to_string(), receiver.to_string(), html.to_string()));
    }

    fn append_log_line(&mut self, line: &str) {
        self.log_lines.push(line.to_string());
    }

    fn clear_log(&mut self) {
        self.log_lines.clear();
        self.log_clears += 1;
    }

    fn clear_table(&mut self) {
        self.rows.clear();
        self.table_clears += 1;
    }

    fn scroll_to_bottom(&mut self) {
        self.scrolls += 1;
    }
}

impl NotificationSink for MemorySink {
    fn notify_success(&mut self, text: &str) {
        self.successes.push(text.to_string());
    }

    fn notify_error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_everything() {
        let mut sink = MemorySink::default();
        sink.append_row("A", "B", "hi");
        sink.append_log_line("line");
        sink.scroll_to_bottom();
        sink.notify_success("yes");
        sink.notify_error("no");

        assert_eq!(
            sink.rows,
            [("A".to_string(), "B".to_string(), "hi".to_string())]
        );
        assert_eq!(sink.log_lines, ["line".to_string()]);
        assert_eq!(sink.scrolls, 1);
        assert_eq!(sink.successes, ["yes".to_string()]);
        assert_eq!(sink.errors, ["no".to_string()]);
    }

    #[test]
    fn memory_sink_clear_empties_views() {
        let mut sink = MemorySink::default();
        sink.append_row("A", "B", "hi");
        sink.append_log_line("line");
        sink.clear_log();
        sink.clear_table();

        assert!(sink.rows.is_empty());
        assert!(sink.log_lines.is_empty());
        assert_eq!(sink.log_clears, 1);
        assert_eq!(sink.table_clears, 1);
    }

    #[test]
    fn toast_sink_builder() {
        let sink = ToastSink::new("wsmock").with_timeout(3);
        assert_eq!(sink.timeout_secs, 3);
        assert_eq!(sink.app_name, "wsmock");
    }
}
