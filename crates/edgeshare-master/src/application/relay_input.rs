//! RelayInputUseCase: the master's edge monitor and relay sender.
//!
//! This use case is the heart of the master application.  The session loop
//! drives it from three sources:
//!
//! - [`poll_tick`] every poll interval: samples the pointer, computes the
//!   delta from the previous sample, and either checks the right edge (while
//!   `Local`) or forwards the delta (while `Remote`).
//! - [`handle_captured`] for every key or button event pushed by capture.
//! - [`handle_incoming`] for every message received from the slave.
//!
//! While `Remote` a `mousemove` is sent on *every* tick, including `(0, 0)`,
//! so the slave stays in step even if a frame is lost.  The tick that sends
//! `grab` does not also send a delta.
//!
//! # Architecture
//!
//! This use case depends only on traits (`InputTransmitter`, `CursorTracker`,
//! `ScreenGeometry`) and domain types.  All infrastructure implementations
//! are injected at construction time, making the use case fully
//! unit-testable.
//!
//! [`poll_tick`]: RelayInputUseCase::poll_tick
//! [`handle_captured`]: RelayInputUseCase::handle_captured
//! [`handle_incoming`]: RelayInputUseCase::handle_incoming

use std::sync::Arc;

use edgeshare_core::{
    ControlState, ControlStateMachine, Disposition, InputEvent, InputTransmitter, Point,
    RightEdgeThreshold, Role, TransmitError,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::infrastructure::input_capture::{CaptureError, CapturedEvent, GeometryError};

/// Error type for the relay use case.
///
/// Only transport loss is reported; capture and geometry failures are
/// absorbed inside the use case.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("transmitter error: {0}")]
    Transmit(#[from] TransmitError),
}

/// Trait for reading the physical master pointer position.
pub trait CursorTracker: Send + Sync {
    /// Returns the current pointer position in master screen coordinates.
    fn pointer_position(&self) -> Result<Point, CaptureError>;
}

/// Trait for discovering the master screen width.
pub trait ScreenGeometry: Send + Sync {
    fn screen_width(&self) -> Result<u32, GeometryError>;
}

/// Tunables for the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaySettings {
    /// Pixel margin before the right edge that triggers `grab`.
    pub edge_threshold: u32,
    /// Forward key and button events even while `Local`.
    pub forward_input_while_local: bool,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            edge_threshold: RightEdgeThreshold::default().margin(),
            forward_input_while_local: false,
        }
    }
}

/// What one poll tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Pointer sampled; nothing sent.
    Idle,
    /// The right edge was reached and `grab` was sent.
    Grabbed,
    /// A `mousemove` with this delta was sent.
    Forwarded { dx: i32, dy: i32 },
    /// The pointer position could not be read this tick.
    NoSample,
}

/// The Relay Input use case.
pub struct RelayInputUseCase {
    control: ControlStateMachine,
    edge: RightEdgeThreshold,
    forward_input_while_local: bool,
    last_pos: Option<Point>,
    screen_width: Option<u32>,
    geometry_warned: bool,
    transmitter: Arc<dyn InputTransmitter>,
    cursor: Arc<dyn CursorTracker>,
    geometry: Arc<dyn ScreenGeometry>,
}

impl RelayInputUseCase {
    /// Creates a new use case instance in the `Local` state.
    pub fn new(
        settings: RelaySettings,
        transmitter: Arc<dyn InputTransmitter>,
        cursor: Arc<dyn CursorTracker>,
        geometry: Arc<dyn ScreenGeometry>,
    ) -> Self {
        Self {
            control: ControlStateMachine::new(Role::Master),
            edge: RightEdgeThreshold::new(settings.edge_threshold),
            forward_input_while_local: settings.forward_input_while_local,
            last_pos: None,
            screen_width: None,
            geometry_warned: false,
            transmitter,
            cursor,
            geometry,
        }
    }

    pub fn state(&self) -> ControlState {
        self.control.state()
    }

    /// Returns the cached screen width, if it has been resolved.
    pub fn screen_width(&self) -> Option<u32> {
        self.screen_width
    }

    /// Samples the pointer once and acts on the result.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Transmit`] if the outbound queue has closed.
    pub async fn poll_tick(&mut self) -> Result<TickOutcome, RelayError> {
        let pos = match self.cursor.pointer_position() {
            Ok(pos) => pos,
            Err(e) => {
                debug!("pointer sample skipped: {e}");
                return Ok(TickOutcome::NoSample);
            }
        };
        let (dx, dy) = self.last_pos.map_or((0, 0), |prev| pos.delta_from(prev));
        self.last_pos = Some(pos);

        match self.control.state() {
            ControlState::Local => {
                let Some(width) = self.resolve_screen_width() else {
                    return Ok(TickOutcome::Idle);
                };
                if !self.edge.is_reached(pos.x, width) {
                    return Ok(TickOutcome::Idle);
                }
                match self.control.edge_reached() {
                    Some(grab) => {
                        info!("right edge reached at x={} (width {width}); handing control to slave", pos.x);
                        if let Err(e) = self.transmitter.send_event(grab).await {
                            // The slave never hears about it, so keep control here.
                            self.control.disconnect();
                            return Err(e.into());
                        }
                        Ok(TickOutcome::Grabbed)
                    }
                    None => Ok(TickOutcome::Idle),
                }
            }
            ControlState::Remote => {
                self.transmitter
                    .send_event(InputEvent::PointerDelta { dx, dy })
                    .await?;
                Ok(TickOutcome::Forwarded { dx, dy })
            }
        }
    }

    /// Handles a key or button event from capture.
    ///
    /// Returns `true` if the event was queued for the slave.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Transmit`] if the outbound queue has closed.
    pub async fn handle_captured(&mut self, event: CapturedEvent) -> Result<bool, RelayError> {
        if !self.control.is_remote() && !self.forward_input_while_local {
            return Ok(false);
        }
        let event = InputEvent::from(event);
        debug!("forwarding {}", event.message_type());
        self.transmitter.send_event(event).await?;
        Ok(true)
    }

    /// Applies a message received from the slave.
    pub fn handle_incoming(&mut self, event: &InputEvent) -> Disposition {
        let disposition = self.control.apply_message(event);
        match disposition {
            Disposition::Transitioned(_) => info!("control returned from slave"),
            Disposition::AlreadyInState => debug!("release received while already local"),
            Disposition::NotForRole => {
                debug!("ignoring {} from slave", event.message_type())
            }
            Disposition::Inject | Disposition::Suppressed => {}
        }
        disposition
    }

    /// Returns to `Local` and forgets the last sample.  Used on disconnect.
    pub fn reset(&mut self) -> ControlState {
        self.last_pos = None;
        self.control.disconnect()
    }

    fn resolve_screen_width(&mut self) -> Option<u32> {
        if self.screen_width.is_none() {
            match self.geometry.screen_width() {
                Ok(width) => {
                    if self.geometry_warned {
                        info!("screen width now available ({width} px); edge handoff enabled");
                    }
                    self.screen_width = Some(width);
                }
                Err(e) if !self.geometry_warned => {
                    warn!("{e}; edge handoff disabled until it becomes available");
                    self.geometry_warned = true;
                }
                Err(_) => {}
            }
        }
        self.screen_width
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::input_capture::mock::{MockInputSource, MockScreenGeometry};
    use edgeshare_core::transport::mock::RecordingTransmitter;
    use edgeshare_core::{KeyIdentifier, MouseButton, NamedKey};

    struct Harness {
        relay: RelayInputUseCase,
        tx: RecordingTransmitter,
        cursor: MockInputSource,
        geometry: MockScreenGeometry,
    }

    fn make_relay(settings: RelaySettings, geometry: MockScreenGeometry) -> Harness {
        let tx = RecordingTransmitter::new();
        let cursor = MockInputSource::new();
        let relay = RelayInputUseCase::new(
            settings,
            Arc::new(tx.clone()),
            Arc::new(cursor.clone()),
            Arc::new(geometry.clone()),
        );
        Harness {
            relay,
            tx,
            cursor,
            geometry,
        }
    }

    fn default_harness() -> Harness {
        make_relay(RelaySettings::default(), MockScreenGeometry::with_width(1920))
    }

    /// Moves the pointer to the right edge and runs one tick.
    async fn grab(h: &mut Harness) {
        h.cursor.set_pointer(1919, 500);
        assert_eq!(h.relay.poll_tick().await.unwrap(), TickOutcome::Grabbed);
        h.tx.take();
    }

    // ── Edge monitor ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_pointer_left_of_threshold_stays_local_and_sends_nothing() {
        // Arrange
        let mut h = default_harness();

        // Act
        for x in [0, 960, 1917] {
            h.cursor.set_pointer(x, 400);
            h.relay.poll_tick().await.unwrap();
        }

        // Assert
        assert_eq!(h.relay.state(), ControlState::Local);
        assert!(h.tx.sent().is_empty());
    }

    #[tokio::test]
    async fn test_first_sample_at_threshold_sends_exactly_one_grab() {
        // Arrange
        let mut h = default_harness();
        h.cursor.set_pointer(1900, 300);
        h.relay.poll_tick().await.unwrap();

        // Act
        h.cursor.set_pointer(1918, 300);
        let outcome = h.relay.poll_tick().await.unwrap();

        // Assert: grab only, no delta on the same tick
        assert_eq!(outcome, TickOutcome::Grabbed);
        assert_eq!(h.relay.state(), ControlState::Remote);
        assert_eq!(h.tx.sent(), vec![InputEvent::Grab]);
    }

    #[tokio::test]
    async fn test_repeated_edge_samples_do_not_resend_grab() {
        // Arrange
        let mut h = default_harness();
        grab(&mut h).await;

        // Act
        for _ in 0..3 {
            h.relay.poll_tick().await.unwrap();
        }

        // Assert
        let sent = h.tx.sent();
        assert!(!sent.contains(&InputEvent::Grab));
        assert_eq!(sent.len(), 3);
    }

    #[tokio::test]
    async fn test_remote_sends_delta_every_tick_including_zero() {
        // Arrange
        let mut h = default_harness();
        grab(&mut h).await;

        // Act
        h.relay.poll_tick().await.unwrap();
        h.cursor.set_pointer(1915, 510);
        h.relay.poll_tick().await.unwrap();

        // Assert
        assert_eq!(
            h.tx.sent(),
            vec![
                InputEvent::PointerDelta { dx: 0, dy: 0 },
                InputEvent::PointerDelta { dx: -4, dy: 10 },
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_pointer_sample_is_skipped() {
        let mut h = default_harness();
        assert_eq!(h.relay.poll_tick().await.unwrap(), TickOutcome::NoSample);
        assert!(h.tx.sent().is_empty());
    }

    // ── Screen geometry ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_unknown_screen_width_disables_grab_until_available() {
        // Arrange
        let mut h = make_relay(RelaySettings::default(), MockScreenGeometry::unavailable());
        h.cursor.set_pointer(5000, 0);

        // Act: width unknown
        let first = h.relay.poll_tick().await.unwrap();
        let second = h.relay.poll_tick().await.unwrap();

        // Assert
        assert_eq!(first, TickOutcome::Idle);
        assert_eq!(second, TickOutcome::Idle);
        assert!(h.tx.sent().is_empty());

        // Act: width becomes available
        h.geometry.set_width(1920);
        let third = h.relay.poll_tick().await.unwrap();

        // Assert
        assert_eq!(third, TickOutcome::Grabbed);
        assert_eq!(h.relay.screen_width(), Some(1920));
    }

    // ── Capture gating ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_captured_input_is_not_forwarded_while_local() {
        // Arrange
        let mut h = default_harness();

        // Act
        let forwarded = h
            .relay
            .handle_captured(CapturedEvent::KeyDown(KeyIdentifier::Char('x')))
            .await
            .unwrap();

        // Assert
        assert!(!forwarded);
        assert!(h.tx.sent().is_empty());
    }

    #[tokio::test]
    async fn test_captured_input_is_forwarded_while_remote() {
        // Arrange
        let mut h = default_harness();
        grab(&mut h).await;

        // Act
        h.relay
            .handle_captured(CapturedEvent::ButtonDown(MouseButton::Right))
            .await
            .unwrap();
        h.relay
            .handle_captured(CapturedEvent::KeyUp(KeyIdentifier::Named(NamedKey::Enter)))
            .await
            .unwrap();

        // Assert
        assert_eq!(
            h.tx.sent(),
            vec![
                InputEvent::ButtonEvent {
                    button: MouseButton::Right,
                    pressed: true
                },
                InputEvent::KeyEvent {
                    key: KeyIdentifier::Named(NamedKey::Enter),
                    pressed: false
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_forward_while_local_setting_sends_input_unconditionally() {
        // Arrange
        let settings = RelaySettings {
            forward_input_while_local: true,
            ..RelaySettings::default()
        };
        let mut h = make_relay(settings, MockScreenGeometry::with_width(1920));

        // Act
        let forwarded = h
            .relay
            .handle_captured(CapturedEvent::ButtonUp(MouseButton::Left))
            .await
            .unwrap();

        // Assert
        assert!(forwarded);
        assert_eq!(h.relay.state(), ControlState::Local);
        assert_eq!(h.tx.sent().len(), 1);
    }

    // ── Incoming messages ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_release_returns_to_local_regardless_of_pointer_position() {
        // Arrange
        let mut h = default_harness();
        grab(&mut h).await;

        // Act: pointer is still at the right edge
        let disposition = h.relay.handle_incoming(&InputEvent::Release);

        // Assert
        assert_eq!(disposition, Disposition::Transitioned(ControlState::Local));
        assert_eq!(h.relay.state(), ControlState::Local);
    }

    #[tokio::test]
    async fn test_pointer_still_at_edge_after_release_grabs_again() {
        let mut h = default_harness();
        grab(&mut h).await;
        h.relay.handle_incoming(&InputEvent::Release);

        assert_eq!(h.relay.poll_tick().await.unwrap(), TickOutcome::Grabbed);
    }

    #[tokio::test]
    async fn test_reset_forces_local() {
        let mut h = default_harness();
        grab(&mut h).await;

        assert_eq!(h.relay.reset(), ControlState::Remote);
        assert_eq!(h.relay.state(), ControlState::Local);
    }

    #[tokio::test]
    async fn test_closed_transmitter_surfaces_as_error() {
        // Arrange
        let mut h = default_harness();
        h.tx.close();
        h.cursor.set_pointer(1919, 0);

        // Act
        let result = h.relay.poll_tick().await;

        // Assert
        assert!(matches!(result, Err(RelayError::Transmit(TransmitError::QueueClosed))));
    }

    #[tokio::test]
    async fn test_failed_grab_send_keeps_control_local() {
        // Arrange
        let mut h = default_harness();
        h.tx.close();
        h.cursor.set_pointer(1919, 0);

        // Act
        let result = h.relay.poll_tick().await;

        // Assert
        assert!(result.is_err());
        assert_eq!(h.relay.state(), ControlState::Local);
        assert!(h.tx.sent().is_empty());
    }
}
