//! Application layer use cases for the master application.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules) and the infrastructure (OS/network/storage).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "hand the
//!   keyboard and mouse to the slave when the pointer reaches the right
//!   edge").
//! - **Depend on abstractions** (traits) rather than concrete implementations,
//!   so the infrastructure can be swapped without changing this code.
//! - **Contain no OS calls, no network I/O, no file system access**.
//!
//! # Sub-modules
//!
//! - **`relay_input`** – Samples the pointer, detects the right edge, sends
//!   `grab`, and forwards deltas, keys and clicks while the slave has control.

pub mod relay_input;
