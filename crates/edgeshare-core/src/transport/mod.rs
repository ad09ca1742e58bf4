//! WebSocket transport shared by master and slave.
//!
//! # How a session is wired (for beginners)
//!
//! A WebSocket connection is split into a *sink* (write half) and a *stream*
//! (read half).  Only one task may own the sink, so every component that
//! wants to send something (the poll loop, key and button capture, the edge
//! watcher) pushes an [`InputEvent`] into an [`OutboundQueue`].  A single
//! writer task spawned by [`spawn_writer`] drains that queue, encodes each
//! event, and writes it as one text frame.  Each producer's events stay in
//! order (FIFO per producer); no ordering is promised *between* producers.
//!
//! The read half stays with the session loop, which calls [`next_inbound`]
//! to get the next decoded event.  Malformed and unmapped frames are
//! filtered out there so the session loop only sees events it can act on,
//! plus a single [`CloseReason`] when the connection ends.

pub mod connection;
pub mod inbound;
pub mod mock;
pub mod outbound;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

use crate::protocol::messages::InputEvent;

pub use connection::{
    accept, accept_until_shutdown, connect, connect_until_shutdown, shutdown_requested, ws_url,
};
pub use inbound::{next_inbound, Inbound};
pub use outbound::{finish_writer, spawn_writer, OutboundQueue};

/// Default TCP port for both roles.
pub const DEFAULT_PORT: u16 = 8080;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Failures that prevent a session from starting.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tungstenite::Error,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to accept connection: {0}")]
    Accept(#[source] std::io::Error),

    #[error("WebSocket handshake failed: {0}")]
    Handshake(#[source] tungstenite::Error),

    #[error("WebSocket handshake not completed within {0:?}")]
    HandshakeTimeout(Duration),
}

/// Returned by an [`InputTransmitter`] when its session has gone away.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransmitError {
    #[error("outbound queue closed; session is shutting down")]
    QueueClosed,
}

// ── Close reasons ─────────────────────────────────────────────────────────────

/// Why a session's connection ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The peer sent a Close frame.  `code` is `1005` when the frame had no
    /// status.
    Peer { code: u16, reason: String },
    /// The stream ended without a Close frame.
    StreamEnded,
    /// A transport-level error ended the connection.
    Transport(String),
    /// This endpoint shut the session down (Ctrl+C).
    LocalShutdown,
}

impl CloseReason {
    /// The WebSocket close code, when one was received.
    pub fn code(&self) -> Option<u16> {
        match self {
            CloseReason::Peer { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseReason::Peer { code, reason } if reason.is_empty() => {
                write!(f, "closed by peer (code {code})")
            }
            CloseReason::Peer { code, reason } => {
                write!(f, "closed by peer (code {code}: {reason})")
            }
            CloseReason::StreamEnded => f.write_str("connection dropped without a close frame"),
            CloseReason::Transport(e) => write!(f, "transport error: {e}"),
            CloseReason::LocalShutdown => f.write_str("shut down locally"),
        }
    }
}

// ── Transmitter seam ──────────────────────────────────────────────────────────

/// Anything that can queue an event for delivery to the peer.
///
/// The session wiring uses [`OutboundQueue`]; unit tests use
/// [`mock::RecordingTransmitter`] and inspect what was sent.
#[async_trait]
pub trait InputTransmitter: Send + Sync {
    /// Queues `event` for the writer task.
    ///
    /// # Errors
    ///
    /// Returns [`TransmitError::QueueClosed`] once the session is tearing down.
    async fn send_event(&self, event: InputEvent) -> Result<(), TransmitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_reason_display_includes_code_and_reason() {
        let reason = CloseReason::Peer {
            code: 1001,
            reason: "going away".to_string(),
        };
        assert_eq!(reason.to_string(), "closed by peer (code 1001: going away)");
        assert_eq!(reason.code(), Some(1001));
    }

    #[test]
    fn test_close_reason_without_frame_has_no_code() {
        assert_eq!(CloseReason::StreamEnded.code(), None);
        assert_eq!(
            CloseReason::Peer {
                code: 1000,
                reason: String::new()
            }
            .to_string(),
            "closed by peer (code 1000)"
        );
    }
}
