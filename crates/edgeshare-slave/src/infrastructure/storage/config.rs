//! TOML-based configuration for the slave application.
//!
//! Read from `--config <PATH>` or from `slave.toml` in the platform config
//! directory.  Every field is optional.  Example:
//!
//! ```toml
//! log_level = "info"
//!
//! [network]
//! bind_address = "0.0.0.0"
//! port = 8080
//! handshake_timeout_ms = 5000
//!
//! [edge]
//! margin_px = 0
//! watch_interval_ms = 50
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use edgeshare_core::config::{load_toml, ConfigError};
use edgeshare_core::domain::edge::DEFAULT_LEFT_EDGE_MARGIN;
use edgeshare_core::transport::outbound::DEFAULT_QUEUE_CAPACITY;
use edgeshare_core::transport::DEFAULT_PORT;
use edgeshare_core::LeftEdgeThreshold;

use crate::infrastructure::network::session::SessionSettings;

/// File name of the slave config inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "slave.toml";

/// Top-level slave configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub edge: EdgeConfig,
}

/// Where to listen for the master.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// `0.0.0.0` accepts masters on every interface; `127.0.0.1` only local.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// How long an accepted connection may take to complete the upgrade.
    #[serde(default = "default_handshake_timeout_ms")]
    pub handshake_timeout_ms: u64,
}

/// Edge watcher settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeConfig {
    /// Pointer x at or below this value returns control to the master.
    #[serde(default = "default_margin_px")]
    pub margin_px: i32,
    #[serde(default = "default_watch_interval_ms")]
    pub watch_interval_ms: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}
fn default_handshake_timeout_ms() -> u64 {
    5000
}
fn default_margin_px() -> i32 {
    DEFAULT_LEFT_EDGE_MARGIN
}
fn default_watch_interval_ms() -> u64 {
    50
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            network: NetworkConfig::default(),
            edge: EdgeConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            queue_capacity: default_queue_capacity(),
            handshake_timeout_ms: default_handshake_timeout_ms(),
        }
    }
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            margin_px: default_margin_px(),
            watch_interval_ms: default_watch_interval_ms(),
        }
    }
}

impl AppConfig {
    /// Converts the file settings into session settings.
    ///
    /// A zero watch interval is clamped to 1 ms.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            watch_interval: Duration::from_millis(self.edge.watch_interval_ms.max(1)),
            queue_capacity: self.network.queue_capacity,
            edge: LeftEdgeThreshold::new(self.edge.margin_px),
            handshake_timeout: Duration::from_millis(self.network.handshake_timeout_ms),
        }
    }
}

/// Loads the slave config from `explicit` or the platform default location.
///
/// # Errors
///
/// Returns [`ConfigError`] if an explicit file is missing or any file is
/// unreadable or malformed.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_toml(explicit, CONFIG_FILE_NAME)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_listens_on_all_interfaces() {
        // Arrange / Act
        let cfg = AppConfig::default();

        // Assert
        assert_eq!(cfg.network.bind_address, "0.0.0.0");
        assert_eq!(cfg.network.port, 8080);
        assert_eq!(cfg.edge.margin_px, 0);
        assert_eq!(cfg.edge.watch_interval_ms, 50);
    }

    #[test]
    fn test_deserialize_partial_network_overrides_defaults() {
        let toml_str = r#"
[network]
port = 9100
"#;

        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize partial");

        assert_eq!(cfg.network.port, 9100);
        assert_eq!(cfg.network.bind_address, "0.0.0.0");
        assert_eq!(cfg.edge, EdgeConfig::default());
    }

    #[test]
    fn test_deserialize_rejects_wrong_types() {
        let result: Result<AppConfig, _> = toml::from_str("[edge]\nmargin_px = \"left\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_session_settings_uses_margin_and_clamps_interval() {
        let mut cfg = AppConfig::default();
        cfg.edge.margin_px = 4;
        cfg.edge.watch_interval_ms = 0;

        let settings = cfg.session_settings();

        assert_eq!(settings.edge, LeftEdgeThreshold::new(4));
        assert_eq!(settings.watch_interval, Duration::from_millis(1));
        assert_eq!(settings.handshake_timeout, Duration::from_secs(5));
    }
}
