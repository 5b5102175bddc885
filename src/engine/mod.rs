//! engine
//!
//! Orchestration of the two synchronization procedures.
//!
//! # Architecture
//!
//! Each procedure is an explicit state machine driven by a `step`
//! function, one state per external operation:
//!
//! ```text
//! update:  Locking -> Updating -> (Uploading | Skipped) -> Done
//! commit:  Locking -> Updating -> Uploading -> Downloading -> Checking
//!                  -> (Committing | Skipped) -> Done
//! ```
//!
//! The process lock is taken in `Locking` and held by the run until
//! `Done`. Any failing step returns early; the lock guard is dropped on
//! the way out, so the lock is released on every path. Nothing is retried;
//! every step is safe to repeat, so recovery is a re-run.
//!
//! # Modules
//!
//! - [`update`] - update-from-repository state machine
//! - [`commit`] - commit-to-repository state machine
//! - [`message`] - commit message assembly

pub mod commit;
pub mod message;
pub mod update;

pub use commit::{CommitReport, CommitState};
pub use update::{UpdateReport, UpdateState};

use std::path::PathBuf;

use thiserror::Error;

use crate::core::config::Config;
use crate::core::ops::lock::{LockError, ProcessLock};
use crate::core::status::StatusError;
use crate::svn::{SvnClient, SvnError, SvnRepository};
use crate::sync::{LangSync, SyncError};
use crate::ui::output::Verbosity;

/// Errors that abort an orchestrated operation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The process lock could not be taken (or released).
    #[error(transparent)]
    Lock(#[from] LockError),

    /// An SVN step failed.
    #[error("{phase} failed")]
    Svn {
        phase: &'static str,
        #[source]
        source: SvnError,
    },

    /// A sync gateway step failed.
    #[error("{phase} failed")]
    Sync {
        phase: &'static str,
        #[source]
        source: SyncError,
    },

    /// The commit message file could not be rewritten.
    #[error("cannot prepare commit message {}", .path.display())]
    Message {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    /// Another run holds the process lock.
    pub fn is_lock_busy(&self) -> bool {
        matches!(self, EngineError::Lock(LockError::Busy { .. }))
    }

    /// The working copy contains changes langbridge does not make.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            EngineError::Svn {
                source: SvnError::Status(StatusError::InvalidState { .. }),
                ..
            }
        )
    }
}

/// Fixed inputs of every run.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub lock_file: PathBuf,
    pub message_file: PathBuf,
    pub commit_banner: String,
    pub verbosity: Verbosity,
}

impl EngineSettings {
    pub fn from_config(config: &Config, verbosity: Verbosity) -> Self {
        Self {
            lock_file: config.lock_file(),
            message_file: config.message_file(),
            commit_banner: config.commit_banner().to_string(),
            verbosity,
        }
    }
}

/// Runs the synchronization procedures against an SVN client and a sync
/// gateway.
#[derive(Debug)]
pub struct Orchestrator<C, L> {
    repo: SvnRepository<C>,
    sync: L,
    settings: EngineSettings,
}

impl<C: SvnClient, L: LangSync> Orchestrator<C, L> {
    pub fn new(repo: SvnRepository<C>, sync: L, settings: EngineSettings) -> Self {
        Self {
            repo,
            sync,
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    fn acquire_lock(&self) -> Result<ProcessLock, EngineError> {
        Ok(ProcessLock::acquire(&self.settings.lock_file)?)
    }

    fn progress(&self, message: impl std::fmt::Display) {
        crate::ui::output::info(message, self.settings.verbosity);
    }
}

/// Tag an SVN error with the phase it occurred in.
fn svn_failed(phase: &'static str) -> impl FnOnce(SvnError) -> EngineError {
    move |source| EngineError::Svn { phase, source }
}

/// Tag a sync error with the phase it occurred in.
fn sync_failed(phase: &'static str) -> impl FnOnce(SyncError) -> EngineError {
    move |source| EngineError::Sync { phase, source }
}
