//! svn
//!
//! Single interface for all SVN operations.
//!
//! # Architecture
//!
//! No other module runs `svn` directly. The layering is:
//!
//! - [`SvnClient`]: raw commands (`status`, `revert`, `update`, `commit`)
//! - [`SvnRepository`]: status policy and update detection on top of a client
//!
//! # Modules
//!
//! - `client`: trait, error type and the command-line implementation
//! - `repo`: working copy operations
//! - [`mock`]: in-memory client for deterministic testing
//!
//! # Example
//!
//! ```ignore
//! use langbridge::core::status::LineClassifier;
//! use langbridge::svn::{CommandSvn, SvnRepository};
//!
//! let repo = SvnRepository::new(CommandSvn::default(), LineClassifier::new(".txt")?, "translators");
//! if repo.update(&working_copy)? {
//!     println!("language files changed upstream");
//! }
//! ```

mod client;
pub mod mock;
mod repo;

pub use client::{CommandSvn, SvnClient, SvnError};
pub use repo::SvnRepository;
