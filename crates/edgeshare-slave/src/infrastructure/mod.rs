//! Infrastructure layer for the slave application.
//!
//! Contains OS-facing adapters: input injection, the WebSocket server, and
//! configuration storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `edgeshare_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.
//!
//! # Sub-modules
//!
//! - **`input_injection`** – Implementations of `PlatformInputInjector`: a
//!   recording mock, and an `rdev` backend behind the `native-input` feature.
//!
//! - **`network`** – Accepts one master at a time and runs the receive and
//!   edge-watch loop for each connection.
//!
//! - **`storage`** – The slave's TOML config schema.

pub mod input_injection;
pub mod network;
pub mod storage;
