//! core
//!
//! Core domain types, configuration, and operations for langbridge.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ProjectId, WorkingCopy
//! - [`config`] - Configuration schema and loading
//! - [`ops`] - Process locking
//! - [`status`] - Classification of SVN status and update output
//! - [`tool`] - External command invocation
//!
//! # Design Principles
//!
//! - Identifiers are validated once, at the boundary
//! - Schemas are strict and reject unknown keys
//! - Nothing here talks to the network

pub mod config;
pub mod ops;
pub mod status;
pub mod tool;
pub mod types;
