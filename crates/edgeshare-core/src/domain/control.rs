//! Control-handoff state machine.
//!
//! Each endpoint owns exactly one [`ControlStateMachine`].  Master and slave
//! never share it; they stay consistent only through `Grab` and `Release`
//! messages on the wire.
//!
//! # Transition table
//!
//! | Role   | From     | Trigger                       | To       | Emits     |
//! |--------|----------|-------------------------------|----------|-----------|
//! | Master | `Local`  | local pointer at right edge   | `Remote` | `Grab`    |
//! | Master | `Remote` | `Release` received            | `Local`  | –         |
//! | Slave  | `Local`  | `Grab` received               | `Remote` | –         |
//! | Slave  | `Remote` | local pointer at left edge    | `Local`  | `Release` |
//! | Either | any      | transport disconnect          | `Local`  | –         |
//!
//! Every other combination leaves the state untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::protocol::messages::InputEvent;

/// Which machine currently owns physical input, from one endpoint's view.
///
/// On the master, `Remote` means captured input is forwarded to the slave.
/// On the slave, `Remote` means received input is injected locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlState {
    /// Input stays on this machine (master) or is ignored (slave).
    #[default]
    Local,
    /// Input is forwarded (master) or injected (slave).
    Remote,
}

impl fmt::Display for ControlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlState::Local => f.write_str("local"),
            ControlState::Remote => f.write_str("remote"),
        }
    }
}

/// The side of the link an endpoint plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Owns the physical keyboard and mouse; grabs on the right edge.
    Master,
    /// Injects forwarded input; releases on the left edge.
    Slave,
}

/// What the state machine decided about a received message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The message moved the machine into the contained state.
    Transitioned(ControlState),
    /// A `Grab`/`Release` arrived while already in the target state.
    AlreadyInState,
    /// The message must be injected (slave in `Remote` only).
    Inject,
    /// Input arrived while the slave is `Local`; it must not be injected.
    Suppressed,
    /// This role never acts on the message (e.g. the master receiving `Grab`).
    NotForRole,
}

/// Single-owner record of who controls input for one session.
///
/// Create a fresh machine for every connection: the initial state is always
/// [`ControlState::Local`].
#[derive(Debug, Clone)]
pub struct ControlStateMachine {
    role: Role,
    state: ControlState,
}

impl ControlStateMachine {
    /// Creates a machine for `role` in the `Local` state.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            state: ControlState::Local,
        }
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    /// Returns `true` while this endpoint is forwarding (master) or injecting (slave).
    pub fn is_remote(&self) -> bool {
        self.state == ControlState::Remote
    }

    /// Reports that the local pointer reached this role's handoff edge.
    ///
    /// Returns the message to send when the report causes a transition:
    /// `Grab` for a master leaving `Local`, `Release` for a slave leaving
    /// `Remote`.  Returns `None` when the machine is already in the matching
    /// state, which makes repeated edge samples idempotent.
    pub fn edge_reached(&mut self) -> Option<InputEvent> {
        match (self.role, self.state) {
            (Role::Master, ControlState::Local) => {
                self.state = ControlState::Remote;
                Some(InputEvent::Grab)
            }
            (Role::Slave, ControlState::Remote) => {
                self.state = ControlState::Local;
                Some(InputEvent::Release)
            }
            _ => None,
        }
    }

    /// Applies a message received from the peer.
    ///
    /// Only `Grab` (slave) and `Release` (master) change state.  Input events
    /// are classified as [`Disposition::Inject`] or [`Disposition::Suppressed`]
    /// for the slave and [`Disposition::NotForRole`] for the master.
    pub fn apply_message(&mut self, event: &InputEvent) -> Disposition {
        match (self.role, event) {
            (Role::Slave, InputEvent::Grab) => self.enter(ControlState::Remote),
            (Role::Master, InputEvent::Release) => self.enter(ControlState::Local),
            (_, InputEvent::Grab | InputEvent::Release) => Disposition::NotForRole,
            (Role::Master, _) => Disposition::NotForRole,
            (Role::Slave, _) if self.is_remote() => Disposition::Inject,
            (Role::Slave, _) => Disposition::Suppressed,
        }
    }

    /// Forces the machine back to `Local` after the transport closed.
    ///
    /// Returns the state the machine was in before the reset.
    pub fn disconnect(&mut self) -> ControlState {
        std::mem::replace(&mut self.state, ControlState::Local)
    }

    fn enter(&mut self, target: ControlState) -> Disposition {
        if self.state == target {
            Disposition::AlreadyInState
        } else {
            self.state = target;
            Disposition::Transitioned(target)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
