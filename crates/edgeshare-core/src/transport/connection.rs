//! Opening WebSocket connections.
//!
//! The master dials out with [`connect`]; the slave upgrades each accepted
//! TCP stream with [`accept`].  Both return a plain `WebSocketStream` that
//! the caller splits into sink and stream halves.
//!
//! The `*_until_shutdown` variants race the same work against the process
//! `running` flag and return `Ok(None)` once it is cleared, so a silent peer
//! never holds up Ctrl+C.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::time::{interval, timeout};
use tokio_tungstenite::{accept_async, connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use super::TransportError;

/// Builds the `ws://` URL for `host:port`, bracketing IPv6 literals.
pub fn ws_url(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("ws://[{host}]:{port}")
    } else {
        format!("ws://{host}:{port}")
    }
}

/// Connects to a slave at `host:port`.
///
/// # Errors
///
/// Returns [`TransportError::Connect`] if the TCP connection or the
/// WebSocket handshake fails.
pub async fn connect(
    host: &str,
    port: u16,
) -> Result<WebSocketStream<MaybeTlsStream<TcpStream>>, TransportError> {
    let url = ws_url(host, port);
    debug!("connecting to {url}");
    let (stream, response) = connect_async(url.as_str())
        .await
        .map_err(|source| TransportError::Connect { url, source })?;
    debug!("handshake complete (HTTP {})", response.status());
    Ok(stream)
}

/// Completes the server side of the WebSocket handshake on `stream`.
///
/// # Errors
///
/// Returns [`TransportError::Handshake`] if the peer is not speaking
/// WebSocket.
pub async fn accept<S>(stream: S) -> Result<WebSocketStream<S>, TransportError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    accept_async(stream).await.map_err(TransportError::Handshake)
}

/// How often a pending connect or handshake re-checks the `running` flag.
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// Resolves once `running` has been cleared.
pub async fn shutdown_requested(running: &AtomicBool) {
    let mut ticker = interval(SHUTDOWN_POLL);
    while running.load(Ordering::Relaxed) {
        ticker.tick().await;
    }
}

/// [`connect`], abandoned when `running` is cleared.
///
/// Returns `Ok(None)` if shutdown won the race.
///
/// # Errors
///
/// Returns [`TransportError::Connect`] as [`connect`] does.
pub async fn connect_until_shutdown(
    host: &str,
    port: u16,
    running: &AtomicBool,
) -> Result<Option<WebSocketStream<MaybeTlsStream<TcpStream>>>, TransportError> {
    tokio::select! {
        result = connect(host, port) => result.map(Some),
        () = shutdown_requested(running) => {
            debug!("shutdown requested while connecting");
            Ok(None)
        }
    }
}

/// [`accept`] with a deadline, abandoned when `running` is cleared.
///
/// Returns `Ok(None)` if shutdown won the race.
///
/// # Errors
///
/// Returns [`TransportError::HandshakeTimeout`] if the peer has not
/// completed the upgrade within `limit`, or [`TransportError::Handshake`]
/// if it is not speaking WebSocket.
pub async fn accept_until_shutdown<S>(
    stream: S,
    limit: Duration,
    running: &AtomicBool,
) -> Result<Option<WebSocketStream<S>>, TransportError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    tokio::select! {
        result = timeout(limit, accept(stream)) => match result {
            Ok(upgraded) => upgraded.map(Some),
            Err(_) => Err(TransportError::HandshakeTimeout(limit)),
        },
        () = shutdown_requested(running) => Ok(None),
    }
}
