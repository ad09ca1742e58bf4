//! Input injection backends.
//!
//! The native backend is selected at compile time with the `native-input`
//! feature.  The mock is always built: tests use it, and so does a binary
//! built without native support.

pub mod mock;

#[cfg(feature = "native-input")]
pub mod native;
