//! Network infrastructure for the slave application.
//!
//! # Sub-modules
//!
//! - **`server`** – Binds the listening socket and accepts masters one at a
//!   time; each connection becomes one session.
//! - **`session`** – Connection supervisor: runs the receive and edge-watch
//!   loop for one master and guarantees the control state is `Local` once it
//!   returns.

pub mod server;
pub mod session;
