//! langbridge - keep SVN language files and a translation service in sync
//!
//! langbridge moves translation files between an SVN working copy and a
//! translation service. Base-language changes committed to SVN are uploaded
//! to the service; translations made on the service are downloaded and
//! committed back to SVN with a message crediting the translators.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - State machines for the update and commit procedures
//! - [`core`] - Domain types, configuration, locking, and output parsing
//! - [`svn`] - Single interface for all Subversion operations
//! - [`sync`] - Gateway to the translation service's sync tool
//! - [`ui`] - Progress output
//! - [`logging`] - Diagnostic tracing setup
//!
//! # Correctness Invariants
//!
//! 1. At most one procedure runs at a time on a host
//! 2. Nothing is committed from a working copy holding foreign changes
//! 3. Every procedure can be re-run after a failure

pub mod cli;
pub mod core;
pub mod engine;
pub mod logging;
pub mod svn;
pub mod sync;
pub mod ui;
