//! Recording transmitter for unit and integration tests.
//!
//! Captures every event the code under test tries to send so tests can assert
//! on exactly what would have reached the wire.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{InputTransmitter, TransmitError};
use crate::protocol::messages::InputEvent;

/// An [`InputTransmitter`] that stores sent events in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransmitter {
    sent: Arc<Mutex<Vec<InputEvent>>>,
    closed: Arc<Mutex<bool>>,
}

impl RecordingTransmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything sent so far, oldest first.
    pub fn sent(&self) -> Vec<InputEvent> {
        self.sent.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Returns and clears everything sent so far.
    pub fn take(&self) -> Vec<InputEvent> {
        self.sent
            .lock()
            .map(|mut v| std::mem::take(&mut *v))
            .unwrap_or_default()
    }

    /// Makes every later send fail with [`TransmitError::QueueClosed`].
    pub fn close(&self) {
        if let Ok(mut closed) = self.closed.lock() {
            *closed = true;
        }
    }
}

#[async_trait]
impl InputTransmitter for RecordingTransmitter {
    async fn send_event(&self, event: InputEvent) -> Result<(), TransmitError> {
        if self.closed.lock().map(|c| *c).unwrap_or(true) {
            return Err(TransmitError::QueueClosed);
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(event);
        }
        Ok(())
    }
}
