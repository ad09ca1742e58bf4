//! Input capture infrastructure for the master application.
//!
//! Capture has two halves with different shapes:
//!
//! - **Pointer position** is *pulled*: the relay polls [`CursorTracker`] once
//!   per tick and derives deltas itself.
//! - **Keys and buttons** are *pushed*: the platform hook fires on its own
//!   thread and places a [`CapturedEvent`] into a bounded Tokio channel that
//!   the session loop drains.
//!
//! The hook callback must return quickly, so it never blocks on the channel:
//! when the queue is full the event is dropped and logged.
//!
//! # Testability
//!
//! The `InputSource`, `CursorTracker` and `ScreenGeometry` traits allow unit
//! tests to inject synthetic events and positions without any OS hooks.
//!
//! [`CursorTracker`]: crate::application::relay_input::CursorTracker

use tokio::sync::mpsc;

use edgeshare_core::{InputEvent, KeyIdentifier, MouseButton};

pub mod mock;

#[cfg(feature = "native-input")]
pub mod native;

/// Capacity of the capture → session channel.
pub const CAPTURE_QUEUE_CAPACITY: usize = 256;

/// A discrete input event produced by the capture backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedEvent {
    KeyDown(KeyIdentifier),
    KeyUp(KeyIdentifier),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
}

impl From<CapturedEvent> for InputEvent {
    fn from(event: CapturedEvent) -> Self {
        match event {
            CapturedEvent::KeyDown(key) => InputEvent::KeyEvent { key, pressed: true },
            CapturedEvent::KeyUp(key) => InputEvent::KeyEvent {
                key,
                pressed: false,
            },
            CapturedEvent::ButtonDown(button) => InputEvent::ButtonEvent {
                button,
                pressed: true,
            },
            CapturedEvent::ButtonUp(button) => InputEvent::ButtonEvent {
                button,
                pressed: false,
            },
        }
    }
}

/// Error type for input capture operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to install input hook: {0}")]
    HookInstallFailed(String),
    #[error("pointer position is not known yet")]
    PositionUnavailable,
}

/// Error returned when the local screen size cannot be determined.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeometryError {
    #[error("screen geometry unavailable: {0}")]
    Unavailable(String),
}

/// Trait abstracting key and button event production.
///
/// The production implementation uses `rdev` hooks; tests use
/// [`mock::MockInputSource`].
pub trait InputSource: Send + Sync {
    /// Starts the source and returns a receiver for captured events.
    fn start(&self) -> Result<mpsc::Receiver<CapturedEvent>, CaptureError>;
    /// Stops forwarding events; the receiver returned by `start` closes.
    fn stop(&self);
}
