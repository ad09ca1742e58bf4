//! # edgeshare-core
//!
//! Shared library for EdgeShare containing the control-handoff state machine,
//! the JSON wire codec, the key vocabulary, and the WebSocket transport
//! plumbing used by both the master and the slave.
//!
//! # Architecture overview (for beginners)
//!
//! EdgeShare lets one keyboard and mouse drive two machines.  The *master*
//! watches its own pointer; when the pointer touches the right edge of the
//! master screen it sends `Grab` to the *slave* and starts forwarding input.
//! The slave injects that input locally until its own pointer touches the left
//! edge of its screen, at which point it sends `Release` and control returns
//! to the master.
//!
//! This crate (`edgeshare-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – Pure business logic with no OS dependencies: who owns
//!   input right now ([`ControlStateMachine`]) and when a pointer counts as
//!   "at the edge".
//!
//! - **`keymap`** – The [`KeyIdentifier`] vocabulary shared by capture and
//!   injection: either a printable character or a named symbolic key.
//!
//! - **`protocol`** – How events travel over the network.  Each message is a
//!   single JSON object whose `type` field selects the variant.
//!
//! - **`transport`** – WebSocket connect/accept helpers, the outbound writer
//!   task, and inbound frame classification.
//!
//! - **`config`** – Locating and parsing the optional TOML settings file.

pub mod config;
pub mod domain;
pub mod keymap;
pub mod protocol;
pub mod transport;

// Re-export the most-used types at the crate root so callers can write
// `edgeshare_core::ControlState` instead of the full module path.
pub use config::ConfigError;
pub use domain::control::{ControlState, ControlStateMachine, Disposition, Role};
pub use domain::edge::{LeftEdgeThreshold, RightEdgeThreshold};
pub use domain::pointer::Point;
pub use domain::session::SessionId;
pub use keymap::{KeyIdentifier, KeyParseError, NamedKey};
pub use protocol::codec::{decode_message, encode_message, ProtocolError};
pub use protocol::messages::{InputEvent, MessageType, MouseButton};
pub use transport::{
    CloseReason, Inbound, InputTransmitter, OutboundQueue, TransmitError, TransportError,
};
