//! sync
//!
//! Gateway to the translation service.
//!
//! # Architecture
//!
//! The [`LangSync`] trait defines the two transfers langbridge needs:
//! upload (base language plus translations) and download (translations
//! plus contributor credits). The engine only sees the trait.
//!
//! # Modules
//!
//! - `traits`: [`LangSync`] and [`SyncError`]
//! - `tool`: [`LangSyncTool`], which runs the external sync tool
//! - [`mock`]: in-memory gateway for deterministic testing

pub mod mock;
mod tool;
mod traits;

pub use tool::LangSyncTool;
pub use traits::{LangSync, SyncError};
