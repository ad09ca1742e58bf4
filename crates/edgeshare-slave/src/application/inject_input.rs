//! InjectInputUseCase: the slave's injector and edge watcher.
//!
//! The session loop drives this use case from two sources:
//!
//! - [`handle_message`] for every event received from the master.  `grab`
//!   switches the slave to `Remote`; input events are injected only while
//!   `Remote` and ignored otherwise.
//! - [`watch_edge`] on every watcher tick.  While `Remote`, a pointer at or
//!   left of the margin switches back to `Local` and queues `release`.  The
//!   slave does not wait for the master to acknowledge it.
//!
//! Pointer deltas are applied as read-modify-write of the absolute position
//! rather than a native relative move, so the slave's pointer follows the
//! master's delta stream exactly regardless of OS pointer acceleration.
//! Some backends only learn the position from OS move events; if it is still
//! unknown when `grab` arrives, the pointer is placed just inside the left
//! edge at mid-height so the first delta has a base.
//!
//! [`handle_message`]: InjectInputUseCase::handle_message
//! [`watch_edge`]: InjectInputUseCase::watch_edge

use std::sync::Arc;

use edgeshare_core::{
    ControlState, ControlStateMachine, Disposition, InputEvent, InputTransmitter, KeyIdentifier,
    LeftEdgeThreshold, MouseButton, Point, Role, TransmitError,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Error type for input injection operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InjectionError {
    #[error("platform error: {0}")]
    Platform(String),
    #[error("no native key for {0}")]
    UnmappedKey(KeyIdentifier),
    #[error("pointer position unavailable")]
    PositionUnavailable,
}

/// Platform-agnostic input injection trait.
///
/// Each backend provides an implementation in the infrastructure layer.
pub trait PlatformInputInjector: Send + Sync {
    /// Returns the current local pointer position.
    fn pointer_position(&self) -> Result<Point, InjectionError>;

    /// Returns the primary screen size as `(width, height)`.
    fn screen_size(&self) -> Result<(u32, u32), InjectionError>;

    /// Moves the pointer to an absolute position in slave screen coordinates.
    fn emit_pointer_position(&self, pos: Point) -> Result<(), InjectionError>;

    /// Presses or releases a mouse button at the current pointer position.
    fn emit_button(&self, button: MouseButton, pressed: bool) -> Result<(), InjectionError>;

    /// Presses or releases a key.
    fn emit_key(&self, key: KeyIdentifier, pressed: bool) -> Result<(), InjectionError>;
}

/// The Inject Input use case.
pub struct InjectInputUseCase {
    control: ControlStateMachine,
    edge: LeftEdgeThreshold,
    injector: Arc<dyn PlatformInputInjector>,
    transmitter: Arc<dyn InputTransmitter>,
}

impl InjectInputUseCase {
    /// Creates a new use case instance in the `Local` state.
    pub fn new(
        edge: LeftEdgeThreshold,
        injector: Arc<dyn PlatformInputInjector>,
        transmitter: Arc<dyn InputTransmitter>,
    ) -> Self {
        Self {
            control: ControlStateMachine::new(Role::Slave),
            edge,
            injector,
            transmitter,
        }
    }

    pub fn state(&self) -> ControlState {
        self.control.state()
    }

    /// Applies one message from the master.
    ///
    /// Injection failures are logged here and never returned: one bad event
    /// must not end the session.
    pub fn handle_message(&mut self, event: &InputEvent) -> Disposition {
        let disposition = self.control.apply_message(event);
        match disposition {
            Disposition::Transitioned(_) => {
                info!("master handed over control; injecting input");
                self.seed_pointer();
            }
            Disposition::AlreadyInState => debug!("grab received while already remote"),
            Disposition::Inject => self.inject(event),
            Disposition::Suppressed => {
                debug!("ignoring {} while local", event.message_type())
            }
            Disposition::NotForRole => {
                debug!("ignoring {} from master", event.message_type())
            }
        }
        disposition
    }

    /// Checks the left edge once.
    ///
    /// Returns `true` when control was handed back and `release` queued.
    ///
    /// # Errors
    ///
    /// Returns [`TransmitError`] if the outbound queue has closed.
    pub async fn watch_edge(&mut self) -> Result<bool, TransmitError> {
        if !self.control.is_remote() {
            return Ok(false);
        }
        let pos = match self.injector.pointer_position() {
            Ok(pos) => pos,
            Err(e) => {
                debug!("edge check skipped: {e}");
                return Ok(false);
            }
        };
        if !self.edge.is_reached(pos.x) {
            return Ok(false);
        }
        let Some(release) = self.control.edge_reached() else {
            return Ok(false);
        };
        info!("left edge reached at x={}; returning control to master", pos.x);
        self.transmitter.send_event(release).await?;
        Ok(true)
    }

    /// Returns to `Local`.  Used on disconnect.
    pub fn reset(&mut self) -> ControlState {
        self.control.disconnect()
    }

    fn inject(&self, event: &InputEvent) {
        let result = match *event {
            InputEvent::PointerDelta { dx, dy } => self.move_pointer(dx, dy),
            InputEvent::ButtonEvent { button, pressed } => self.injector.emit_button(button, pressed),
            InputEvent::KeyEvent { key, pressed } => self.injector.emit_key(key, pressed),
            InputEvent::Grab | InputEvent::Release => Ok(()),
        };
        match result {
            Ok(()) => {}
            Err(e @ InjectionError::UnmappedKey(_)) => warn!("dropping {}: {e}", event.message_type()),
            Err(e) => error!("{} injection failed: {e}", event.message_type()),
        }
    }

    /// Places the pointer inside the left edge when its position is unknown.
    fn seed_pointer(&self) {
        if self.injector.pointer_position().is_ok() {
            return;
        }
        let y = match self.injector.screen_size() {
            Ok((_, height)) => i32::try_from(height / 2).unwrap_or(0),
            Err(e) => {
                debug!("screen size unavailable: {e}");
                0
            }
        };
        let entry = Point::new(self.edge.margin().saturating_add(1), y);
        match self.injector.emit_pointer_position(entry) {
            Ok(()) => info!("pointer position unknown; placed at ({}, {})", entry.x, entry.y),
            Err(e) => warn!("could not place pointer: {e}"),
        }
    }

    fn move_pointer(&self, dx: i32, dy: i32) -> Result<(), InjectionError> {
        let current = self.injector.pointer_position()?;
        let target = current.offset_by(dx, dy);
        self.injector.emit_pointer_position(target)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
