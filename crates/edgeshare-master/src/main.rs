//! EdgeShare master entry point.
//!
//! Connects to a slave, then hands the local keyboard and mouse over whenever
//! the pointer touches the right edge of this screen.  Exits when the session
//! ends (the slave disconnects or Ctrl+C is pressed); there is no automatic
//! reconnect.  Ctrl+C also abandons a connection attempt that is still
//! waiting on the slave.
//!
//! # Usage
//!
//! ```text
//! edgeshare-master <HOST> [PORT]
//!
//! Options:
//!   --edge-threshold <PX>       Right-edge margin in pixels [default: 2]
//!   --poll-interval-ms <MS>     Pointer poll period [default: 16]
//!   --forward-while-local       Forward keys and clicks even while local
//!   --config <PATH>             TOML config file
//! ```
//!
//! CLI values override the config file, which overrides built-in defaults.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load config, init tracing
//!  └─ connect ws://HOST:PORT
//!  └─ run_master_session()
//!       ├─ poll ticker   → RelayInputUseCase (edge monitor + relay sender)
//!       ├─ capture queue → RelayInputUseCase (keys, clicks)
//!       └─ inbound       → RelayInputUseCase (release)
//! ```

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use edgeshare_core::transport;
use edgeshare_master::infrastructure::network::session::{run_master_session, CaptureBackend};
use edgeshare_master::infrastructure::storage::config::{load_config, AppConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// EdgeShare master.
///
/// Shares this machine's keyboard and mouse with a slave placed to the right
/// of this screen.
#[derive(Debug, Parser)]
#[command(name = "edgeshare-master", version)]
struct Cli {
    /// Hostname or IP address of the slave.
    #[arg(env = "EDGESHARE_HOST")]
    host: Option<String>,

    /// Slave port [default: 8080].
    #[arg(env = "EDGESHARE_PORT")]
    port: Option<u16>,

    /// Pixels before the right edge that trigger the handoff.
    #[arg(long, env = "EDGESHARE_EDGE_THRESHOLD")]
    edge_threshold: Option<u32>,

    /// Pointer poll period in milliseconds.
    #[arg(long, env = "EDGESHARE_POLL_INTERVAL_MS")]
    poll_interval_ms: Option<u64>,

    /// Forward key and button events even while the master has control.
    #[arg(long)]
    forward_while_local: bool,

    /// Path to a TOML config file.  Defaults to `master.toml` in the
    /// platform config directory.
    #[arg(long, env = "EDGESHARE_MASTER_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Applies CLI overrides on top of the loaded file config.
    fn apply_to(&self, cfg: &mut AppConfig) {
        if let Some(host) = &self.host {
            cfg.network.host = Some(host.clone());
        }
        if let Some(port) = self.port {
            cfg.network.port = port;
        }
        if let Some(px) = self.edge_threshold {
            cfg.edge.threshold_px = px;
        }
        if let Some(ms) = self.poll_interval_ms {
            cfg.edge.poll_interval_ms = ms;
        }
        if self.forward_while_local {
            cfg.relay.forward_input_while_local = true;
        }
    }
}

// ── Capture backend ───────────────────────────────────────────────────────────

#[cfg(feature = "native-input")]
fn capture_backend() -> anyhow::Result<CaptureBackend> {
    use edgeshare_master::infrastructure::input_capture::native::{RdevCapture, RdevGeometry};

    let capture = Arc::new(RdevCapture::new());
    capture
        .ensure_listener()
        .context("failed to install input hooks")?;
    Ok(CaptureBackend {
        source: capture.clone(),
        cursor: capture,
        geometry: Arc::new(RdevGeometry),
    })
}

#[cfg(not(feature = "native-input"))]
fn capture_backend() -> anyhow::Result<CaptureBackend> {
    use edgeshare_master::infrastructure::input_capture::mock::{
        MockInputSource, MockScreenGeometry,
    };

    warn!("built without the `native-input` feature; using an inert capture backend");
    let capture = Arc::new(MockInputSource::new());
    capture.set_pointer(0, 0);
    Ok(CaptureBackend {
        source: capture.clone(),
        cursor: capture,
        geometry: Arc::new(MockScreenGeometry::unavailable()),
    })
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = load_config(cli.config.as_deref()).context("failed to load master config")?;
    cli.apply_to(&mut cfg);

    // `RUST_LOG` wins; otherwise the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cfg.log_level.as_str())),
        )
        .init();

    let host = cfg
        .network
        .host
        .clone()
        .context("no slave host given (pass <HOST> or set network.host in the config)")?;
    let port = cfg.network.port;
    let settings = cfg.session_settings();

    info!(
        "EdgeShare master starting: slave={host}:{port}, edge threshold={} px, poll={:?}",
        settings.relay.edge_threshold, settings.poll_interval
    );
    if settings.relay.forward_input_while_local {
        warn!("forwarding keys and clicks even while this machine has control");
    }

    let backend = capture_backend()?;

    // ── Graceful shutdown flag ────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C; shutting down");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => tracing::error!("failed to listen for Ctrl+C signal: {e}"),
        }
    });

    let Some(ws) = transport::connect_until_shutdown(&host, port, &running)
        .await
        .with_context(|| format!("could not reach slave at {host}:{port}"))?
    else {
        info!("shut down before the slave answered");
        return Ok(());
    };
    info!("connected to slave at {host}:{port}");

    let report = run_master_session(ws, &backend, settings, running).await;

    match report.reason.code() {
        Some(code) => info!("disconnected (code {code}): {}", report.reason),
        None => info!("disconnected: {}", report.reason),
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
