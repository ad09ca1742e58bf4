//! JSON codec for EdgeShare messages.
//!
//! Every message is one JSON object sent as one WebSocket text frame.  The
//! `type` field selects the variant:
//!
//! ```text
//! {"type":"grab"}
//! {"type":"release"}
//! {"type":"mousemove","dx":5,"dy":-3}
//! {"type":"mouseclick","button":"left","down":true}
//! {"type":"keydown","key":"a"}
//! {"type":"keyup","key":"Key.shift"}
//! ```
//!
//! Decoding is tolerant in the same places existing peers are sloppy: a
//! missing or `null` `dx`/`dy` reads as `0`, a missing `button` reads as
//! `left`, a missing `down` reads as `true`, `pressed` is accepted as an alias
//! for `down`, and unknown extra fields are ignored.  Encoding always writes
//! every field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keymap::{KeyIdentifier, KeyParseError};
use crate::protocol::messages::{InputEvent, MouseButton};

/// Errors that can occur during message encoding or decoding.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Not JSON, not an object, unknown `type`, or a field of the wrong type.
    #[error("malformed message: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),

    /// Well-formed message naming a key outside the shared vocabulary.
    #[error("unmapped key identifier {key:?}: {source}")]
    UnknownKey {
        key: String,
        #[source]
        source: KeyParseError,
    },

    /// Well-formed message naming a button other than left/right/middle.
    #[error("unmapped mouse button {0:?}")]
    UnknownButton(String),
}

impl ProtocolError {
    /// Returns `true` when the frame was valid but named a key or button this
    /// endpoint cannot represent.
    ///
    /// Such frames are dropped with a diagnostic; malformed frames are dropped
    /// quietly.
    pub fn is_unmapped_identifier(&self) -> bool {
        matches!(
            self,
            ProtocolError::UnknownKey { .. } | ProtocolError::UnknownButton(_)
        )
    }
}

// ── Wire representation ───────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WireMessage {
    Grab,
    Release,
    #[serde(rename = "mousemove")]
    MouseMove {
        #[serde(default)]
        dx: Option<i32>,
        #[serde(default)]
        dy: Option<i32>,
    },
    #[serde(rename = "mouseclick")]
    MouseClick {
        #[serde(default)]
        button: Option<String>,
        #[serde(default, alias = "pressed")]
        down: Option<bool>,
    },
    #[serde(rename = "keydown")]
    KeyDown { key: String },
    #[serde(rename = "keyup")]
    KeyUp { key: String },
}

impl From<&InputEvent> for WireMessage {
    fn from(event: &InputEvent) -> Self {
        match event {
            InputEvent::Grab => WireMessage::Grab,
            InputEvent::Release => WireMessage::Release,
            InputEvent::PointerDelta { dx, dy } => WireMessage::MouseMove {
                dx: Some(*dx),
                dy: Some(*dy),
            },
            InputEvent::ButtonEvent { button, pressed } => WireMessage::MouseClick {
                button: Some(button.as_wire().to_string()),
                down: Some(*pressed),
            },
            InputEvent::KeyEvent { key, pressed: true } => WireMessage::KeyDown { key: key.to_wire() },
            InputEvent::KeyEvent { key, pressed: false } => WireMessage::KeyUp { key: key.to_wire() },
        }
    }
}

impl TryFrom<WireMessage> for InputEvent {
    type Error = ProtocolError;

    fn try_from(wire: WireMessage) -> Result<Self, Self::Error> {
        let event = match wire {
            WireMessage::Grab => InputEvent::Grab,
            WireMessage::Release => InputEvent::Release,
            WireMessage::MouseMove { dx, dy } => InputEvent::PointerDelta {
                dx: dx.unwrap_or(0),
                dy: dy.unwrap_or(0),
            },
            WireMessage::MouseClick { button, down } => {
                let button = match button.as_deref() {
                    None => MouseButton::Left,
                    Some(name) => MouseButton::from_wire(name)
                        .ok_or_else(|| ProtocolError::UnknownButton(name.to_string()))?,
                };
                InputEvent::ButtonEvent {
                    button,
                    pressed: down.unwrap_or(true),
                }
            }
            WireMessage::KeyDown { key } => InputEvent::KeyEvent {
                key: parse_key(key)?,
                pressed: true,
            },
            WireMessage::KeyUp { key } => InputEvent::KeyEvent {
                key: parse_key(key)?,
                pressed: false,
            },
        };
        Ok(event)
    }
}

fn parse_key(key: String) -> Result<KeyIdentifier, ProtocolError> {
    KeyIdentifier::parse(&key).map_err(|source| ProtocolError::UnknownKey { key, source })
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes an [`InputEvent`] as a single-line JSON object.
///
/// # Errors
///
/// Returns [`ProtocolError::Encode`] if serialization fails.
///
/// # Examples
///
/// ```rust
/// use edgeshare_core::protocol::codec::{decode_message, encode_message};
/// use edgeshare_core::protocol::messages::InputEvent;
///
/// let msg = InputEvent::PointerDelta { dx: 5, dy: -3 };
/// let text = encode_message(&msg).unwrap();
/// assert_eq!(text, r#"{"type":"mousemove","dx":5,"dy":-3}"#);
/// assert_eq!(decode_message(&text).unwrap(), msg);
/// ```
pub fn encode_message(event: &InputEvent) -> Result<String, ProtocolError> {
    serde_json::to_string(&WireMessage::from(event)).map_err(ProtocolError::Encode)
}

/// Decodes one JSON text frame into an [`InputEvent`].
///
/// # Errors
///
/// - [`ProtocolError::Malformed`] for anything that is not a recognised
///   message object.
/// - [`ProtocolError::UnknownKey`] / [`ProtocolError::UnknownButton`] for
///   identifiers outside the shared vocabulary.
pub fn decode_message(text: &str) -> Result<InputEvent, ProtocolError> {
    let wire: WireMessage = serde_json::from_str(text).map_err(ProtocolError::Malformed)?;
    InputEvent::try_from(wire)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::NamedKey;

    #[test]
    fn test_encode_control_messages_have_only_type_field() {
        assert_eq!(encode_message(&InputEvent::Grab).unwrap(), r#"{"type":"grab"}"#);
        assert_eq!(
            encode_message(&InputEvent::Release).unwrap(),
            r#"{"type":"release"}"#
        );
    }

    #[test]
    fn test_encode_mouse_click_uses_down_field() {
        // Arrange
        let event = InputEvent::ButtonEvent {
            button: MouseButton::Right,
            pressed: false,
        };

        // Act
        let text = encode_message(&event).unwrap();

        // Assert
        assert_eq!(text, r#"{"type":"mouseclick","button":"right","down":false}"#);
    }

    #[test]
    fn test_encode_key_events_pick_tag_from_pressed_flag() {
        let down = InputEvent::KeyEvent {
            key: KeyIdentifier::Named(NamedKey::ShiftL),
            pressed: true,
        };
        let up = InputEvent::KeyEvent {
            key: KeyIdentifier::Char('z'),
            pressed: false,
        };
        assert_eq!(
            encode_message(&down).unwrap(),
            r#"{"type":"keydown","key":"Key.shift_l"}"#
        );
        assert_eq!(encode_message(&up).unwrap(), r#"{"type":"keyup","key":"z"}"#);
    }

    #[test]
    fn test_decode_mousemove_missing_or_null_fields_default_to_zero() {
        assert_eq!(
            decode_message(r#"{"type":"mousemove"}"#).unwrap(),
            InputEvent::PointerDelta { dx: 0, dy: 0 }
        );
        assert_eq!(
            decode_message(r#"{"type":"mousemove","dx":null,"dy":7}"#).unwrap(),
            InputEvent::PointerDelta { dx: 0, dy: 7 }
        );
    }

    #[test]
    fn test_decode_mouseclick_defaults_to_left_press() {
        assert_eq!(
            decode_message(r#"{"type":"mouseclick"}"#).unwrap(),
            InputEvent::ButtonEvent {
                button: MouseButton::Left,
                pressed: true
            }
        );
    }

    #[test]
    fn test_decode_mouseclick_accepts_pressed_alias() {
        assert_eq!(
            decode_message(r#"{"type":"mouseclick","button":"middle","pressed":false}"#).unwrap(),
            InputEvent::ButtonEvent {
                button: MouseButton::Middle,
                pressed: false
            }
        );
    }

    #[test]
    fn test_decode_ignores_unknown_extra_fields() {
        assert_eq!(
            decode_message(r#"{"type":"grab","from":"master"}"#).unwrap(),
            InputEvent::Grab
        );
    }

    #[test]
    fn test_decode_rejects_unknown_type_as_malformed() {
        let err = decode_message(r#"{"type":"scroll","dy":3}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed(_)));
        assert!(!err.is_unmapped_identifier());
    }

    #[test]
    fn test_decode_rejects_non_json_as_malformed() {
        for text in ["", "not json", "[1,2]", r#"{"dx":1}"#] {
            assert!(
                matches!(decode_message(text), Err(ProtocolError::Malformed(_))),
                "{text:?} must be malformed"
            );
        }
    }

    #[test]
    fn test_decode_unknown_key_is_unmapped_identifier() {
        let err = decode_message(r#"{"type":"keydown","key":"Key.hyper"}"#).unwrap_err();
        assert!(err.is_unmapped_identifier());
        assert!(matches!(err, ProtocolError::UnknownKey { ref key, .. } if key == "Key.hyper"));
    }

    #[test]
    fn test_decode_unknown_button_is_unmapped_identifier() {
        let err = decode_message(r#"{"type":"mouseclick","button":"x2","down":true}"#).unwrap_err();
        assert!(err.is_unmapped_identifier());
    }
}
