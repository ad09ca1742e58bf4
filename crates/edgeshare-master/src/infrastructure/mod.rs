//! Infrastructure layer for the master application.
//!
//! Contains OS-facing adapters: pointer and input capture, the WebSocket
//! session, and configuration storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `edgeshare_core`, but the `application` layer only reaches into it for
//! plain data types (`CapturedEvent` and the capture error types).

pub mod input_capture;
pub mod network;
pub mod storage;
