//! Network infrastructure for the master application.
//!
//! # Sub-modules
//!
//! - **`session`** – Connection supervisor: runs the poll, receive and
//!   capture loop for one WebSocket connection to the slave and guarantees
//!   the control state is `Local` once it returns.

pub mod session;
