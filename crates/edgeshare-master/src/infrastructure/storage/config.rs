//! TOML-based configuration for the master application.
//!
//! Read from `--config <PATH>` or from `master.toml` in the platform config
//! directory (see [`edgeshare_core::config`]).  Every field is optional; an
//! absent file means all defaults.  Example:
//!
//! ```toml
//! log_level = "debug"
//!
//! [network]
//! port = 8080
//!
//! [edge]
//! threshold_px = 2
//! poll_interval_ms = 16
//!
//! [relay]
//! forward_input_while_local = false
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file, so a file only
//! needs to mention what it changes.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use edgeshare_core::config::{load_toml, ConfigError};
use edgeshare_core::transport::outbound::DEFAULT_QUEUE_CAPACITY;
use edgeshare_core::transport::DEFAULT_PORT;

use crate::application::relay_input::RelaySettings;
use crate::infrastructure::network::session::SessionSettings;

/// File name of the master config inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "master.toml";

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level master configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub edge: EdgeConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

/// Where to reach the slave.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// Slave host; the CLI positional argument overrides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Edge monitor settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeConfig {
    /// Pixels before the right edge that count as "at the edge".
    #[serde(default = "default_threshold_px")]
    pub threshold_px: u32,
    /// Pointer sampling period in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Relay sender settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayConfig {
    /// Forward key and button events even while the master has control.
    #[serde(default)]
    pub forward_input_while_local: bool,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_threshold_px() -> u32 {
    2
}
fn default_poll_interval_ms() -> u64 {
    16
}
fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            network: NetworkConfig::default(),
            edge: EdgeConfig::default(),
            relay: RelayConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_port(),
        }
    }
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            threshold_px: default_threshold_px(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            forward_input_while_local: false,
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl AppConfig {
    /// Converts the file settings into session settings.
    ///
    /// A zero poll interval is clamped to 1 ms.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            poll_interval: Duration::from_millis(self.edge.poll_interval_ms.max(1)),
            queue_capacity: self.relay.queue_capacity,
            relay: RelaySettings {
                edge_threshold: self.edge.threshold_px,
                forward_input_while_local: self.relay.forward_input_while_local,
            },
        }
    }
}

/// Loads the master config from `explicit` or the platform default location.
///
/// # Errors
///
/// Returns [`ConfigError`] if an explicit file is missing or any file is
/// unreadable or malformed.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_toml(explicit, CONFIG_FILE_NAME)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
