//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module defines the slave's TOML schema.  Locating and
//! parsing the file is shared with the master through
//! `edgeshare_core::config`.

pub mod config;
