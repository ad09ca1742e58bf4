//! Application layer use cases for the slave application.
//!
//! - **`inject_input`** – Owns the slave's control state.  Injects received
//!   input while the master has handed control over, and sends `release`
//!   when the local pointer reaches the left edge.  The OS calls are made by
//!   a `PlatformInputInjector` implementation injected at construction time.

pub mod inject_input;
