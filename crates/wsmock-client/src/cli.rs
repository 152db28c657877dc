//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ClientConfig;

/// wsmock - exercise a newline-delimited JSON WebSocket endpoint
#[derive(Debug, Parser)]
#[command(name = "wsmock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// WebSocket endpoint URL (e.g. ws://127.0.0.1:8080/ws)
    pub url: Option<String>,

    /// Path to configuration file
    #[arg(long, short, env = "WSMOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Connection timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Message count after which the log view clears
    #[arg(long)]
    pub reset_threshold: Option<usize>,

    /// Send desktop toasts for success/error notifications
    #[arg(long, conflicts_with = "plain")]
    pub notify: bool,

    /// Keep notifications on the console even when the config enables toasts
    #[arg(long)]
    pub plain: bool,
}

impl Cli {
    /// Applies CLI flags on top of file-based configuration.
    pub fn apply_overrides(&self, config: &mut ClientConfig) {
        if let Some(ref url) = self.url {
            config.connection.url = Some(url.clone());
        }
        if let Some(timeout) = self.timeout {
            config.connection.timeout = timeout;
        }
        if let Some(threshold) = self.reset_threshold {
            config.log.reset_threshold = threshold;
        }
        if self.notify {
            config.notifications.desktop = true;
        }
        if self.plain {
            config.notifications.desktop = false;
        }
        if self.debug {
            config.debug = true;
        }
    }
}
