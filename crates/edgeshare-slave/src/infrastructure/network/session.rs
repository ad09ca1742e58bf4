//! Slave connection supervisor.
//!
//! Owns one WebSocket connection from a master from handshake to close.  A
//! single task runs the loop below; the only other task is the outbound
//! writer, which owns the sink.
//!
//! ```text
//! loop {
//!     select! {
//!         inbound frame   → InjectInputUseCase::handle_message / break on close
//!         watcher ticker  → InjectInputUseCase::watch_edge
//!     }
//! }
//! ```
//!
//! Receive waits as long as it needs to; the watcher ticker keeps running
//! beside it in the same task, so injection and the edge check never race.
//! On exit the state is forced to `Local` and the writer gets a short grace
//! period to send `release` (if queued) and a Close frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::{interval, MissedTickBehavior};
use tokio_tungstenite::WebSocketStream;
use tracing::info;

use edgeshare_core::transport::outbound::DEFAULT_QUEUE_CAPACITY;
use edgeshare_core::transport::{finish_writer, next_inbound, spawn_writer};
use edgeshare_core::{CloseReason, ControlState, Inbound, LeftEdgeThreshold, OutboundQueue, SessionId};

use crate::application::inject_input::{InjectInputUseCase, PlatformInputInjector};

/// How long the writer may take to flush and close after the session ends.
const WRITER_GRACE: Duration = Duration::from_millis(200);

/// Default edge watcher period.
pub const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_millis(50);

/// Default limit on the WebSocket upgrade of an accepted connection.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-session tunables.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub watch_interval: Duration,
    pub queue_capacity: usize,
    pub edge: LeftEdgeThreshold,
    /// Applied by the server before the session starts.
    pub handshake_timeout: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            watch_interval: DEFAULT_WATCH_INTERVAL,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            edge: LeftEdgeThreshold::default(),
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
        }
    }
}

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub session: SessionId,
    pub reason: CloseReason,
    /// State at the moment the connection ended, before the forced reset.
    pub state_at_close: ControlState,
}

/// Runs one slave session over an accepted WebSocket until it closes or
/// `running` is cleared.
pub async fn run_slave_session<S>(
    ws: WebSocketStream<S>,
    injector: Arc<dyn PlatformInputInjector>,
    settings: SessionSettings,
    running: Arc<AtomicBool>,
) -> SessionReport
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let session = SessionId::new();
    info!("session {session}: master connected; control is local");

    let (sink, mut stream) = ws.split();
    let (queue, queue_rx) = OutboundQueue::channel(settings.queue_capacity);
    let writer = spawn_writer(sink, queue_rx, session);

    let mut injector_uc = InjectInputUseCase::new(settings.edge, injector, Arc::new(queue.clone()));

    let mut ticker = interval(settings.watch_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let reason = loop {
        tokio::select! {
            inbound = next_inbound(&mut stream, &session) => match inbound {
                Inbound::Event(event) => {
                    injector_uc.handle_message(&event);
                }
                Inbound::Skipped => {}
                Inbound::Closed(reason) => break reason,
            },
            _ = ticker.tick() => {
                if !running.load(Ordering::Relaxed) {
                    break CloseReason::LocalShutdown;
                }
                if let Err(e) = injector_uc.watch_edge().await {
                    break CloseReason::Transport(e.to_string());
                }
            }
        }
    };

    // ── Teardown ──────────────────────────────────────────────────────────────
    let state_at_close = injector_uc.reset();
    drop(injector_uc);
    drop(queue);
    finish_writer(writer, WRITER_GRACE, session).await;

    info!("session {session}: {reason}; control is local");
    SessionReport {
        session,
        reason,
        state_at_close,
    }
}
