//! Outbound queue and the single writer task that owns the WebSocket sink.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{Sink, SinkExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};
use tracing::{debug, error, trace, warn};

use super::{InputTransmitter, TransmitError};
use crate::domain::session::SessionId;
use crate::protocol::codec::encode_message;
use crate::protocol::messages::InputEvent;

/// Default capacity of the outbound queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Cloneable producer handle for the outbound queue.
///
/// Each clone is an independent producer; the writer task is the only
/// consumer.  When every clone is dropped the writer flushes, sends a Close
/// frame and exits.
#[derive(Debug, Clone)]
pub struct OutboundQueue {
    tx: mpsc::Sender<InputEvent>,
}

impl OutboundQueue {
    /// Creates a bounded queue and returns the producer and consumer halves.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<InputEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

#[async_trait]
impl InputTransmitter for OutboundQueue {
    async fn send_event(&self, event: InputEvent) -> Result<(), TransmitError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| TransmitError::QueueClosed)
    }
}

/// Spawns the task that drains `rx` into `sink` as JSON text frames.
///
/// The task ends when the queue is closed (all producers dropped) or when a
/// write fails.  On a clean end it sends a Close frame.
pub fn spawn_writer<S>(
    mut sink: S,
    mut rx: mpsc::Receiver<InputEvent>,
    session: SessionId,
) -> JoinHandle<()>
where
    S: Sink<WsMessage, Error = WsError> + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match encode_message(&event) {
                Ok(text) => text,
                Err(e) => {
                    error!("session {session}: {e}");
                    continue;
                }
            };
            trace!("session {session}: -> {text}");
            if let Err(e) = sink.send(WsMessage::Text(text)).await {
                debug!("session {session}: write failed, writer stopping: {e}");
                return;
            }
        }

        // Queue closed: the session is ending on our side.
        if let Err(e) = sink.close().await {
            debug!("session {session}: close frame not delivered: {e}");
        }
    })
}

/// Waits up to `grace` for the writer to drain and close, then aborts it.
///
/// Call this after dropping every [`OutboundQueue`] clone so the writer sees
/// the queue close.
pub async fn finish_writer(mut writer: JoinHandle<()>, grace: Duration, session: SessionId) {
    match timeout(grace, &mut writer).await {
        Ok(Ok(())) => debug!("session {session}: writer finished"),
        Ok(Err(e)) => warn!("session {session}: writer task failed: {e}"),
        Err(_) => {
            debug!("session {session}: writer did not finish within {grace:?}; aborting");
            writer.abort();
        }
    }
}
