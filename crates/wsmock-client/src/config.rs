//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/wsmock/config.toml` by default. Every section is optional;
//! CLI flags override file values.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logbuf::DEFAULT_RESET_THRESHOLD;

/// Configuration for the wsmock client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Connection settings.
    #[serde(default)]
    pub connection: ConnectionSettings,

    /// Message log settings.
    #[serde(default)]
    pub log: LogSettings,

    /// Notification settings.
    #[serde(default)]
    pub notifications: NotificationSettings,
}

/// Connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Endpoint URL to dial on startup.
    pub url: Option<String>,

    /// Connect timeout in seconds.
    pub timeout: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            url: None,
            timeout: 5,
        }
    }
}

/// Message log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Message count after which the log view clears.
    pub reset_threshold: usize,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            reset_threshold: DEFAULT_RESET_THRESHOLD,
        }
    }
}

/// Notification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Send desktop toasts in addition to console output.
    pub desktop: bool,

    /// Application name used for desktop toasts.
    pub app_name: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            desktop: false,
            app_name: "wsmock".to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| format!("failed to read config: {}", e))?;
            toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wsmock")
    }
}
