//! EdgeShare protocol message types.
//!
//! The protocol has exactly six message kinds.  Two of them (`grab`,
//! `release`) carry control ownership; the other four carry input.  In memory
//! all six are one [`InputEvent`] enum; press and release of the same key or
//! button share a variant and differ only in `pressed`.

use std::fmt;

use crate::keymap::KeyIdentifier;

// ── Message type tags ─────────────────────────────────────────────────────────

/// The value of the `type` field for each message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Grab,
    Release,
    MouseMove,
    MouseClick,
    KeyDown,
    KeyUp,
}

impl MessageType {
    /// Returns the wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Grab => "grab",
            MessageType::Release => "release",
            MessageType::MouseMove => "mousemove",
            MessageType::MouseClick => "mouseclick",
            MessageType::KeyDown => "keydown",
            MessageType::KeyUp => "keyup",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Mouse buttons ─────────────────────────────────────────────────────────────

/// Mouse buttons that can be forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Returns the wire name (`left`, `right`, `middle`).
    pub fn as_wire(self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
        }
    }

    /// Parses a wire name.  A `Button.` prefix is accepted and ignored.
    ///
    /// Returns `None` for anything else, e.g. `"x1"`.
    pub fn from_wire(s: &str) -> Option<MouseButton> {
        match s.strip_prefix("Button.").unwrap_or(s) {
            "left" => Some(MouseButton::Left),
            "right" => Some(MouseButton::Right),
            "middle" => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// One protocol message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Control offered to the slave.
    Grab,
    /// Control returned to the master.
    Release,
    /// Relative pointer movement in the master's pixel units.
    PointerDelta { dx: i32, dy: i32 },
    /// Mouse button press (`pressed == true`) or release.
    ButtonEvent { button: MouseButton, pressed: bool },
    /// Key press (`pressed == true`) or release.
    KeyEvent { key: KeyIdentifier, pressed: bool },
}

impl InputEvent {
    /// Returns the wire tag this event encodes to.
    pub fn message_type(&self) -> MessageType {
        match self {
            InputEvent::Grab => MessageType::Grab,
            InputEvent::Release => MessageType::Release,
            InputEvent::PointerDelta { .. } => MessageType::MouseMove,
            InputEvent::ButtonEvent { .. } => MessageType::MouseClick,
            InputEvent::KeyEvent { pressed: true, .. } => MessageType::KeyDown,
            InputEvent::KeyEvent { pressed: false, .. } => MessageType::KeyUp,
        }
    }
}
