//! Storage infrastructure: configuration file loading.
//!
//! This module provides a thin adapter between the application and the
//! file system.  The `config` sub-module defines the master's TOML schema and
//! turns it into the settings the session runs with.  Locating and parsing the
//! file is shared with the slave through `edgeshare_core::config`.

pub mod config;
