//! Master connection supervisor.
//!
//! Owns one WebSocket connection to the slave from handshake to close.  A
//! single task runs the loop below; the only other task is the outbound
//! writer, which owns the sink.
//!
//! ```text
//! loop {
//!     select! {
//!         poll ticker      → RelayInputUseCase::poll_tick
//!         inbound frame    → RelayInputUseCase::handle_incoming / break on close
//!         captured event   → RelayInputUseCase::handle_captured
//!     }
//! }
//! ```
//!
//! Because every branch runs on the same task, the control state has a single
//! writer and never needs a lock.  On exit, for any reason, the state is
//! forced to `Local`, capture is stopped, and the writer is given a short
//! grace period to send a Close frame before it is aborted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tokio_tungstenite::WebSocketStream;
use tracing::{debug, info, warn};

use edgeshare_core::transport::outbound::DEFAULT_QUEUE_CAPACITY;
use edgeshare_core::transport::{finish_writer, next_inbound, spawn_writer};
use edgeshare_core::{CloseReason, ControlState, Inbound, OutboundQueue, SessionId};

use crate::application::relay_input::{
    CursorTracker, RelayInputUseCase, RelaySettings, ScreenGeometry,
};
use crate::infrastructure::input_capture::{CapturedEvent, InputSource};

/// How long the writer may take to flush and close after the session ends.
const WRITER_GRACE: Duration = Duration::from_millis(200);

/// Default pointer poll interval (~60 Hz).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Per-session tunables.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub poll_interval: Duration,
    pub queue_capacity: usize,
    pub relay: RelaySettings,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            relay: RelaySettings::default(),
        }
    }
}

/// The platform collaborators a master session needs.
#[derive(Clone)]
pub struct CaptureBackend {
    pub source: Arc<dyn InputSource>,
    pub cursor: Arc<dyn CursorTracker>,
    pub geometry: Arc<dyn ScreenGeometry>,
}

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub session: SessionId,
    pub reason: CloseReason,
    /// State at the moment the connection ended, before the forced reset.
    pub state_at_close: ControlState,
}

/// Runs one master session over an established WebSocket until it closes or
/// `running` is cleared.
///
/// Never fails: every way a session can end is described by the returned
/// [`SessionReport`].
pub async fn run_master_session<S>(
    ws: WebSocketStream<S>,
    backend: &CaptureBackend,
    settings: SessionSettings,
    running: Arc<AtomicBool>,
) -> SessionReport
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let session = SessionId::new();
    info!("session {session}: connected; control is local");

    let (sink, mut stream) = ws.split();
    let (queue, queue_rx) = OutboundQueue::channel(settings.queue_capacity);
    let writer = spawn_writer(sink, queue_rx, session);

    let mut relay = RelayInputUseCase::new(
        settings.relay,
        Arc::new(queue.clone()),
        Arc::clone(&backend.cursor),
        Arc::clone(&backend.geometry),
    );

    let mut capture_rx = match backend.source.start() {
        Ok(rx) => Some(rx),
        Err(e) => {
            warn!("session {session}: key/button capture unavailable: {e}; pointer handoff only");
            None
        }
    };

    let mut ticker = interval(settings.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let reason = loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !running.load(Ordering::Relaxed) {
                    break CloseReason::LocalShutdown;
                }
                if let Err(e) = relay.poll_tick().await {
                    break CloseReason::Transport(e.to_string());
                }
            }
            inbound = next_inbound(&mut stream, &session) => match inbound {
                Inbound::Event(event) => {
                    relay.handle_incoming(&event);
                }
                Inbound::Skipped => {}
                Inbound::Closed(reason) => break reason,
            },
            captured = next_captured(&mut capture_rx) => match captured {
                Some(event) => {
                    if let Err(e) = relay.handle_captured(event).await {
                        break CloseReason::Transport(e.to_string());
                    }
                }
                None => {
                    debug!("session {session}: capture channel closed");
                    capture_rx = None;
                }
            },
        }
    };

    // ── Teardown ──────────────────────────────────────────────────────────────
    let state_at_close = relay.reset();
    backend.source.stop();
    drop(capture_rx);
    drop(relay);
    drop(queue);
    finish_writer(writer, WRITER_GRACE, session).await;

    info!("session {session}: {reason}; control is local");
    SessionReport {
        session,
        reason,
        state_at_close,
    }
}

/// Receives the next captured event, or waits forever when capture is off.
async fn next_captured(rx: &mut Option<mpsc::Receiver<CapturedEvent>>) -> Option<CapturedEvent> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
