//! edgeshare-slave library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the slave do? (for beginners)
//!
//! The *slave* is the machine placed to the right of the master.  It listens
//! for one master at a time.  After the master sends `grab`, the slave injects
//! every forwarded pointer delta, click and key press as if a local mouse and
//! keyboard produced them.  When the slave's own pointer reaches the left edge
//! of its screen it sends `release` and stops injecting, and the master takes
//! its input back.

/// Application layer: the inject-input use case.
pub mod application;

/// Infrastructure layer: injection backends, the WebSocket server, and config.
pub mod infrastructure;
