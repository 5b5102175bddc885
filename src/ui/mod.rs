//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Timestamped progress and error output
//!
//! # Design
//!
//! All operator-facing output goes through this module so quiet mode is
//! honoured everywhere.

pub mod output;
