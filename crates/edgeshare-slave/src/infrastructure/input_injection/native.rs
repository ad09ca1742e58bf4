//! Native injection backend built on `rdev`.
//!
//! Events are synthesised with `rdev::simulate`.  `rdev` cannot query the
//! pointer, so a listener thread records the last `MouseMove` it sees, and
//! every injected position is recorded as well.  Until the pointer has moved
//! once, [`PlatformInputInjector::pointer_position`] fails; the use case then
//! places the pointer itself on `grab`, which seeds the recorded position.
//!
//! Key translation lives in `edgeshare_core::keymap::rdev_keys`, shared with
//! the master's capture backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rdev::{Button, EventType};
use tracing::error;

use edgeshare_core::keymap::rdev_keys::to_rdev;
use edgeshare_core::{KeyIdentifier, MouseButton, Point};

use crate::application::inject_input::{InjectionError, PlatformInputInjector};

/// `rdev`-backed injector with listener-based pointer tracking.
#[derive(Clone, Default)]
pub struct RdevInjector {
    pointer: Arc<Mutex<Option<Point>>>,
    listener_started: Arc<AtomicBool>,
}

impl RdevInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the pointer-tracking thread if it is not running yet.
    pub fn ensure_listener(&self) -> Result<(), InjectionError> {
        if self.listener_started.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let pointer = Arc::clone(&self.pointer);
        std::thread::Builder::new()
            .name("edgeshare-pointer".to_string())
            .spawn(move || {
                let result = rdev::listen(move |event| {
                    if let EventType::MouseMove { x, y } = event.event_type {
                        if let Ok(mut p) = pointer.lock() {
                            *p = Some(Point::new(x.round() as i32, y.round() as i32));
                        }
                    }
                });
                if let Err(e) = result {
                    error!("pointer listener stopped: {e:?}");
                }
            })
            .map(|_| ())
            .map_err(|e| {
                self.listener_started.store(false, Ordering::SeqCst);
                InjectionError::Platform(e.to_string())
            })
    }

    fn simulate(event: &EventType) -> Result<(), InjectionError> {
        rdev::simulate(event).map_err(|_| InjectionError::Platform(format!("{event:?} refused")))
    }
}

impl PlatformInputInjector for RdevInjector {
    fn pointer_position(&self) -> Result<Point, InjectionError> {
        self.pointer
            .lock()
            .ok()
            .and_then(|p| *p)
            .ok_or(InjectionError::PositionUnavailable)
    }

    fn screen_size(&self) -> Result<(u32, u32), InjectionError> {
        let (width, height) =
            rdev::display_size().map_err(|e| InjectionError::Platform(format!("{e:?}")))?;
        let width = u32::try_from(width).map_err(|_| InjectionError::Platform(format!("width {width} out of range")))?;
        let height = u32::try_from(height).map_err(|_| InjectionError::Platform(format!("height {height} out of range")))?;
        Ok((width, height))
    }

    fn emit_pointer_position(&self, pos: Point) -> Result<(), InjectionError> {
        Self::simulate(&EventType::MouseMove {
            x: f64::from(pos.x),
            y: f64::from(pos.y),
        })?;
        if let Ok(mut p) = self.pointer.lock() {
            *p = Some(pos);
        }
        Ok(())
    }

    fn emit_button(&self, button: MouseButton, pressed: bool) -> Result<(), InjectionError> {
        let button = rdev_button(button);
        let event = if pressed {
            EventType::ButtonPress(button)
        } else {
            EventType::ButtonRelease(button)
        };
        Self::simulate(&event)
    }

    fn emit_key(&self, key: KeyIdentifier, pressed: bool) -> Result<(), InjectionError> {
        let native = to_rdev(key).ok_or(InjectionError::UnmappedKey(key))?;
        let event = if pressed {
            EventType::KeyPress(native)
        } else {
            EventType::KeyRelease(native)
        };
        Self::simulate(&event)
    }
}

fn rdev_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
        MouseButton::Middle => Button::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_button_has_a_native_counterpart() {
        assert_eq!(rdev_button(MouseButton::Left), Button::Left);
        assert_eq!(rdev_button(MouseButton::Right), Button::Right);
        assert_eq!(rdev_button(MouseButton::Middle), Button::Middle);
    }
}
