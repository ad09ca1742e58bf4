//! EdgeShare slave entry point.
//!
//! Listens for a master and injects the keyboard and mouse input it forwards.
//! Runs until Ctrl+C; after a master disconnects the slave waits for the next
//! one.
//!
//! # Usage
//!
//! ```text
//! edgeshare-slave [PORT]
//!
//! Options:
//!   --bind <ADDR>               Address to listen on [default: 0.0.0.0]
//!   --edge-margin <PX>          Left-edge release margin [default: 0]
//!   --watch-interval-ms <MS>    Edge watcher period [default: 50]
//!   --config <PATH>             TOML config file
//! ```
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load config, init tracing
//!  └─ bind 0.0.0.0:PORT
//!  └─ run_server()                  (one master at a time)
//!       └─ run_slave_session()
//!            ├─ inbound         → InjectInputUseCase (grab, input)
//!            └─ watcher ticker  → InjectInputUseCase (release)
//! ```

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use edgeshare_slave::application::inject_input::PlatformInputInjector;
use edgeshare_slave::infrastructure::network::server::{bind, run_server};
use edgeshare_slave::infrastructure::storage::config::{load_config, AppConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// EdgeShare slave.
///
/// Accepts a master and injects its keyboard and mouse input until the
/// pointer reaches the left edge of this screen.
#[derive(Debug, Parser)]
#[command(name = "edgeshare-slave", version)]
struct Cli {
    /// Port to listen on [default: 8080].
    #[arg(env = "EDGESHARE_PORT")]
    port: Option<u16>,

    /// IP address to bind the server to.
    ///
    /// Use `0.0.0.0` to accept masters from any network interface, or
    /// `127.0.0.1` to accept only local connections.
    #[arg(long, env = "EDGESHARE_BIND")]
    bind: Option<String>,

    /// Pointer x at or below this value returns control to the master.
    #[arg(long, env = "EDGESHARE_EDGE_MARGIN", allow_negative_numbers = true)]
    edge_margin: Option<i32>,

    /// Edge watcher period in milliseconds.
    #[arg(long, env = "EDGESHARE_WATCH_INTERVAL_MS")]
    watch_interval_ms: Option<u64>,

    /// Path to a TOML config file.  Defaults to `slave.toml` in the platform
    /// config directory.
    #[arg(long, env = "EDGESHARE_SLAVE_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Applies CLI overrides on top of the loaded file config.
    fn apply_to(&self, cfg: &mut AppConfig) {
        if let Some(port) = self.port {
            cfg.network.port = port;
        }
        if let Some(bind) = &self.bind {
            cfg.network.bind_address = bind.clone();
        }
        if let Some(px) = self.edge_margin {
            cfg.edge.margin_px = px;
        }
        if let Some(ms) = self.watch_interval_ms {
            cfg.edge.watch_interval_ms = ms;
        }
    }
}

// ── Injection backend ─────────────────────────────────────────────────────────

#[cfg(feature = "native-input")]
fn injector() -> anyhow::Result<Arc<dyn PlatformInputInjector>> {
    use edgeshare_slave::infrastructure::input_injection::native::RdevInjector;

    let injector = RdevInjector::new();
    injector
        .ensure_listener()
        .context("failed to start pointer tracking")?;
    Ok(Arc::new(injector))
}

#[cfg(not(feature = "native-input"))]
fn injector() -> anyhow::Result<Arc<dyn PlatformInputInjector>> {
    use edgeshare_slave::infrastructure::input_injection::mock::MockInputInjector;

    tracing::warn!("built without the `native-input` feature; input is recorded, not injected");
    Ok(Arc::new(MockInputInjector::new()))
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = load_config(cli.config.as_deref()).context("failed to load slave config")?;
    cli.apply_to(&mut cfg);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cfg.log_level.as_str())),
        )
        .init();

    let settings = cfg.session_settings();
    info!(
        "EdgeShare slave starting: bind={}:{}, edge margin={} px, watch={:?}",
        cfg.network.bind_address,
        cfg.network.port,
        settings.edge.margin(),
        settings.watch_interval
    );

    let injector = injector()?;

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

    let listener = bind(&cfg.network.bind_address, cfg.network.port).await?;
    let sessions = run_server(listener, injector, settings, running).await;

    info!("EdgeShare slave stopped after {sessions} session(s)");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
