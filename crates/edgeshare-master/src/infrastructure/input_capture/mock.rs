//! Mock capture backend for unit testing and headless runs.
//!
//! Allows tests to inject synthetic [`CapturedEvent`]s and move a virtual
//! pointer without any OS hooks.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::{self, Sender};

use edgeshare_core::Point;

use super::{
    CaptureError, CapturedEvent, GeometryError, InputSource, CAPTURE_QUEUE_CAPACITY,
};
use crate::application::relay_input::{CursorTracker, ScreenGeometry};

/// A mock [`InputSource`] and [`CursorTracker`] driven by the test.
#[derive(Clone)]
pub struct MockInputSource {
    sender: Arc<Mutex<Option<Sender<CapturedEvent>>>>,
    pointer: Arc<Mutex<Option<Point>>>,
}

impl MockInputSource {
    /// Creates a mock with no pointer position yet.
    pub fn new() -> Self {
        Self {
            sender: Arc::new(Mutex::new(None)),
            pointer: Arc::new(Mutex::new(None)),
        }
    }

    /// Injects a synthetic key or button event, as if captured from hardware.
    ///
    /// Returns `false` when the source is not started or the queue is full.
    pub fn inject_event(&self, event: CapturedEvent) -> bool {
        let guard = self.sender.lock().expect("lock poisoned");
        match guard.as_ref() {
            Some(sender) => sender.try_send(event).is_ok(),
            None => false,
        }
    }

    /// Moves the virtual pointer.
    pub fn set_pointer(&self, x: i32, y: i32) {
        *self.pointer.lock().expect("lock poisoned") = Some(Point::new(x, y));
    }

    /// Returns `true` between `start()` and `stop()`.
    pub fn is_running(&self) -> bool {
        self.sender.lock().expect("lock poisoned").is_some()
    }
}

impl Default for MockInputSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for MockInputSource {
    fn start(&self) -> Result<mpsc::Receiver<CapturedEvent>, CaptureError> {
        let (tx, rx) = mpsc::channel(CAPTURE_QUEUE_CAPACITY);
        *self.sender.lock().expect("lock poisoned") = Some(tx);
        Ok(rx)
    }

    fn stop(&self) {
        // Dropping the sender closes the channel.
        *self.sender.lock().expect("lock poisoned") = None;
    }
}

impl CursorTracker for MockInputSource {
    fn pointer_position(&self) -> Result<Point, CaptureError> {
        self.pointer
            .lock()
            .expect("lock poisoned")
            .ok_or(CaptureError::PositionUnavailable)
    }
}

/// A [`ScreenGeometry`] with a fixed (or missing) width.
#[derive(Debug, Clone)]
pub struct MockScreenGeometry {
    width: Arc<Mutex<Option<u32>>>,
}

impl MockScreenGeometry {
    pub fn with_width(width: u32) -> Self {
        Self {
            width: Arc::new(Mutex::new(Some(width))),
        }
    }

    /// A geometry source that cannot report a width until [`set_width`] is called.
    ///
    /// [`set_width`]: MockScreenGeometry::set_width
    pub fn unavailable() -> Self {
        Self {
            width: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_width(&self, width: u32) {
        *self.width.lock().expect("lock poisoned") = Some(width);
    }
}

impl ScreenGeometry for MockScreenGeometry {
    fn screen_width(&self) -> Result<u32, GeometryError> {
        self.width
            .lock()
            .expect("lock poisoned")
            .ok_or_else(|| GeometryError::Unavailable("mock display has no width".to_string()))
    }
}
