//! Domain entities for EdgeShare.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain**.  Domain code:
//!
//! - Contains the core rules of the application.
//! - Has **no** imports from OS APIs, network libraries, or UI frameworks.
//! - Can be compiled and tested on any platform without any external setup.
//!
//! Here the rules are small but strict: exactly one machine owns physical
//! input at a time, ownership changes only on an explicit protocol event, and
//! a dropped connection always hands input back to the local machine.

/// Who owns input right now, and which events may change that.
pub mod control;

/// Screen-edge thresholds for the master (right edge) and slave (left edge).
pub mod edge;

/// Pointer coordinates and delta arithmetic.
pub mod pointer;

/// Per-connection identifiers used for log correlation.
pub mod session;
