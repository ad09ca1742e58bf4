//! Native capture backend built on `rdev`.
//!
//! `rdev::listen` installs a global hook and blocks its thread forever, so
//! the listener thread is started once and never joined.  Between sessions
//! it keeps running but forwards nothing: `stop()` just drops the channel
//! sender.
//!
//! `rdev` offers no pointer query, so the listener also records the last
//! `MouseMove` position; [`CursorTracker::pointer_position`] returns that
//! value and fails until the pointer has moved once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rdev::{Button, EventType};
use tokio::sync::mpsc::{self, error::TrySendError, Sender};
use tracing::{debug, error, warn};

use edgeshare_core::keymap::rdev_keys::from_rdev;
use edgeshare_core::{MouseButton, Point};

use super::{CaptureError, CapturedEvent, GeometryError, InputSource, CAPTURE_QUEUE_CAPACITY};
use crate::application::relay_input::{CursorTracker, ScreenGeometry};

#[derive(Default)]
struct Shared {
    sender: Mutex<Option<Sender<CapturedEvent>>>,
    pointer: Mutex<Option<Point>>,
}

/// Global keyboard/mouse hook plus pointer tracking.
#[derive(Clone, Default)]
pub struct RdevCapture {
    shared: Arc<Shared>,
    listener_started: Arc<AtomicBool>,
}

impl RdevCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the hook thread if it is not running yet.
    ///
    /// Call once at startup so the pointer position is known before the first
    /// session begins polling.
    pub fn ensure_listener(&self) -> Result<(), CaptureError> {
        if self.listener_started.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let shared = Arc::clone(&self.shared);
        std::thread::Builder::new()
            .name("edgeshare-capture".to_string())
            .spawn(move || {
                if let Err(e) = rdev::listen(move |event| on_event(&shared, event.event_type)) {
                    error!("input hook stopped: {e:?}");
                }
            })
            .map(|_| ())
            .map_err(|e| {
                self.listener_started.store(false, Ordering::SeqCst);
                CaptureError::HookInstallFailed(e.to_string())
            })
    }
}

impl InputSource for RdevCapture {
    fn start(&self) -> Result<mpsc::Receiver<CapturedEvent>, CaptureError> {
        self.ensure_listener()?;
        let (tx, rx) = mpsc::channel(CAPTURE_QUEUE_CAPACITY);
        if let Ok(mut sender) = self.shared.sender.lock() {
            *sender = Some(tx);
        }
        Ok(rx)
    }

    fn stop(&self) {
        if let Ok(mut sender) = self.shared.sender.lock() {
            *sender = None;
        }
    }
}

impl CursorTracker for RdevCapture {
    fn pointer_position(&self) -> Result<Point, CaptureError> {
        self.shared
            .pointer
            .lock()
            .ok()
            .and_then(|p| *p)
            .ok_or(CaptureError::PositionUnavailable)
    }
}

/// Screen width from `rdev::display_size` (primary display).
#[derive(Debug, Clone, Copy, Default)]
pub struct RdevGeometry;

impl ScreenGeometry for RdevGeometry {
    fn screen_width(&self) -> Result<u32, GeometryError> {
        let (width, _height) =
            rdev::display_size().map_err(|e| GeometryError::Unavailable(format!("{e:?}")))?;
        u32::try_from(width).map_err(|_| GeometryError::Unavailable(format!("width {width} out of range")))
    }
}

// ── Hook callback ─────────────────────────────────────────────────────────────

fn on_event(shared: &Shared, event: EventType) {
    let captured = match event {
        EventType::MouseMove { x, y } => {
            if let Ok(mut pointer) = shared.pointer.lock() {
                *pointer = Some(Point::new(x.round() as i32, y.round() as i32));
            }
            return;
        }
        EventType::KeyPress(key) => from_rdev(key).map(CapturedEvent::KeyDown),
        EventType::KeyRelease(key) => from_rdev(key).map(CapturedEvent::KeyUp),
        EventType::ButtonPress(button) => mouse_button(button).map(CapturedEvent::ButtonDown),
        EventType::ButtonRelease(button) => mouse_button(button).map(CapturedEvent::ButtonUp),
        EventType::Wheel { .. } => None,
    };

    let Some(captured) = captured else {
        debug!("unmapped input event {event:?}");
        return;
    };

    let Ok(sender) = shared.sender.lock() else {
        return;
    };
    if let Some(sender) = sender.as_ref() {
        match sender.try_send(captured) {
            Ok(()) | Err(TrySendError::Closed(_)) => {}
            Err(TrySendError::Full(dropped)) => warn!("capture queue full; dropped {dropped:?}"),
        }
    }
}

fn mouse_button(button: Button) -> Option<MouseButton> {
    match button {
        Button::Left => Some(MouseButton::Left),
        Button::Right => Some(MouseButton::Right),
        Button::Middle => Some(MouseButton::Middle),
        Button::Unknown(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_buttons_are_mapped() {
        assert_eq!(mouse_button(Button::Left), Some(MouseButton::Left));
        assert_eq!(mouse_button(Button::Middle), Some(MouseButton::Middle));
    }

    #[test]
    fn test_unknown_buttons_are_unmapped() {
        assert_eq!(mouse_button(Button::Unknown(4)), None);
    }
}
