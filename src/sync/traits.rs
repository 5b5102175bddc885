//! sync::traits
//!
//! Sync gateway trait definition.
//!
//! # Design
//!
//! The gateway moves language files between a working copy and the
//! translation service. Both directions are all-or-error: a failed call
//! aborts the orchestrated operation, and the caller relies on re-running
//! the whole operation to recover.

use std::path::Path;

use thiserror::Error;

use crate::core::tool::ToolError;
use crate::core::types::{ProjectId, WorkingCopy};

/// Errors from sync gateway operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The sync tool failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// An operation failed without a process exit status (mock gateways).
    #[error("{operation} failed: {message}")]
    Failed {
        operation: &'static str,
        message: String,
    },
}

/// Transfers language files to and from the translation service.
pub trait LangSync {
    /// Push the base language and all translations of `wc` to `project`.
    fn upload(&self, wc: &WorkingCopy, project: &ProjectId) -> Result<(), SyncError>;

    /// Pull translations of `project` into `wc` (stable and unstable) and
    /// write the contributor credits to `credits_file`.
    fn download(
        &self,
        wc: &WorkingCopy,
        project: &ProjectId,
        credits_file: &Path,
    ) -> Result<(), SyncError>;
}
