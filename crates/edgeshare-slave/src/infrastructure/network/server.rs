//! Slave WebSocket server: accept loop.
//!
//! The slave serves one master at a time.  Each accepted TCP connection is
//! upgraded to a WebSocket and run to completion with
//! [`run_slave_session`] before the next connection is accepted; a second
//! master that connects meanwhile waits in the listen backlog.
//!
//! Shutdown is triggered by the shared `running` flag, which `main.rs` clears
//! on Ctrl+C.  `accept()` uses a short timeout so the flag is re-checked even
//! when nobody is connecting.  The WebSocket upgrade has its own deadline and
//! also yields to the flag, so a client that opens TCP and then stays silent
//! neither blocks the next master nor delays shutdown.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::time::timeout;
use tracing::{error, info, warn};

use edgeshare_core::transport::{self, TransportError};

use super::session::{run_slave_session, SessionSettings};
use crate::application::inject_input::PlatformInputInjector;

/// How often the accept loop wakes up to check the shutdown flag.
const ACCEPT_POLL: Duration = Duration::from_millis(200);

/// Binds the listening socket.
///
/// # Errors
///
/// Returns [`TransportError::Bind`] if the address is invalid, already in
/// use, or the process lacks permission to bind it.
pub async fn bind(address: &str, port: u16) -> Result<TcpListener, TransportError> {
    TcpListener::bind((address, port))
        .await
        .map_err(|source| TransportError::Bind {
            addr: format!("{address}:{port}"),
            source,
        })
}

/// Accepts masters one at a time until `running` is cleared.
///
/// Returns the number of sessions that ran.  Failed accepts and handshakes
/// are logged and skipped; they never stop the server.
pub async fn run_server(
    listener: TcpListener,
    injector: Arc<dyn PlatformInputInjector>,
    settings: SessionSettings,
    running: Arc<AtomicBool>,
) -> usize {
    match listener.local_addr() {
        Ok(addr) => info!("slave listening on {addr}"),
        Err(e) => warn!("slave listening (local address unknown: {e})"),
    }

    let mut sessions = 0;
    loop {
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        let (tcp, peer): (_, SocketAddr) = match timeout(ACCEPT_POLL, listener.accept()).await {
            Ok(Ok(accepted)) => accepted,
            Ok(Err(e)) => {
                error!("{}", TransportError::Accept(e));
                continue;
            }
            // Timeout: loop back to check the `running` flag.
            Err(_) => continue,
        };

        let ws = match transport::accept_until_shutdown(tcp, settings.handshake_timeout, &running)
            .await
        {
            Ok(Some(ws)) => ws,
            Ok(None) => {
                info!("shutdown flag set during handshake with {peer}; stopping accept loop");
                break;
            }
            Err(e) => {
                warn!("rejected connection from {peer}: {e}");
                continue;
            }
        };

        info!("master connected from {peer}");
        let report = run_slave_session(
            ws,
            Arc::clone(&injector),
            settings,
            Arc::clone(&running),
        )
        .await;
        sessions += 1;
        info!(
            "master {peer} disconnected ({}); waiting for the next connection",
            report.reason
        );
    }
    sessions
}
