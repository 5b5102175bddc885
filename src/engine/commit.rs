//! engine::commit
//!
//! Commit-to-repository: merge the service's translations back into the
//! working copy and commit them with the translators' credits.
//!
//! The working copy is updated and uploaded first, unconditionally, so the
//! service merges against the latest base language and the commit never
//! lands on a stale checkout.

use std::fmt;

use super::message::prefix_message_file;
use super::{svn_failed, sync_failed, EngineError, Orchestrator};
use crate::core::ops::lock::ProcessLock;
use crate::core::types::{ProjectId, WorkingCopy};
use crate::svn::SvnClient;
use crate::sync::LangSync;

/// States of the commit-to-repository machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitState {
    Locking,
    Updating,
    Uploading,
    Downloading,
    Checking,
    Committing,
    Skipped,
    Done,
}

impl CommitState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Locking => "locking",
            Self::Updating => "updating",
            Self::Uploading => "uploading",
            Self::Downloading => "downloading",
            Self::Checking => "checking",
            Self::Committing => "committing",
            Self::Skipped => "skipped",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CommitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a commit run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// States visited, in order.
    pub states: Vec<CommitState>,
    /// Language files modified by the download.
    pub modified: Vec<String>,
    /// Whether the commit message file was assembled.
    pub message_prepared: bool,
    /// Whether a commit was made.
    pub committed: bool,
}

struct CommitRun<'a> {
    wc: &'a WorkingCopy,
    project: &'a ProjectId,
    dry_run: bool,
    lock: Option<ProcessLock>,
    report: CommitReport,
}

impl<C: SvnClient, L: LangSync> Orchestrator<C, L> {
    /// Merge translations from the service and commit them.
    ///
    /// With `dry_run` everything up to the commit happens, including
    /// assembling the message file, and the downloaded changes are left in
    /// the working copy.
    ///
    /// # Errors
    ///
    /// Fails fast with a lock error if another run is active; otherwise
    /// returns the first failing step. The lock is released either way.
    pub fn commit_to_repository(
        &self,
        wc: &WorkingCopy,
        project: &ProjectId,
        dry_run: bool,
    ) -> Result<CommitReport, EngineError> {
        let mut run = CommitRun {
            wc,
            project,
            dry_run,
            lock: None,
            report: CommitReport::default(),
        };

        let mut state = CommitState::Locking;
        loop {
            run.report.states.push(state);
            tracing::info!(state = %state, working_copy = %wc, "commit-to-repository");
            if state == CommitState::Done {
                break;
            }
            state = self.commit_step(state, &mut run)?;
        }

        Ok(run.report)
    }

    fn commit_step(
        &self,
        state: CommitState,
        run: &mut CommitRun<'_>,
    ) -> Result<CommitState, EngineError> {
        let message_file = &self.settings.message_file;

        let next = match state {
            CommitState::Locking => {
                run.lock = Some(self.acquire_lock()?);
                CommitState::Updating
            }
            CommitState::Updating => {
                self.progress("Update SVN");
                // Upload follows regardless of what the update brought in.
                self.repo
                    .update(run.wc)
                    .map_err(svn_failed(state.name()))?;
                CommitState::Uploading
            }
            CommitState::Uploading => {
                self.progress("Upload/Merge translations");
                self.sync
                    .upload(run.wc, run.project)
                    .map_err(sync_failed(state.name()))?;
                CommitState::Downloading
            }
            CommitState::Downloading => {
                self.progress("Download translations");
                self.sync
                    .download(run.wc, run.project, message_file)
                    .map_err(sync_failed(state.name()))?;
                CommitState::Checking
            }
            CommitState::Checking => {
                let summary = self
                    .repo
                    .status_summary(run.wc)
                    .map_err(svn_failed(state.name()))?;
                run.report.modified = summary.modified;

                if run.report.modified.is_empty() {
                    CommitState::Skipped
                } else {
                    self.progress("Commit SVN");
                    prefix_message_file(message_file, &self.settings.commit_banner).map_err(
                        |source| EngineError::Message {
                            path: message_file.clone(),
                            source,
                        },
                    )?;
                    run.report.message_prepared = true;

                    if run.dry_run {
                        tracing::info!(
                            files = run.report.modified.len(),
                            "dry run, leaving modifications uncommitted"
                        );
                        CommitState::Skipped
                    } else {
                        CommitState::Committing
                    }
                }
            }
            CommitState::Committing => {
                self.repo
                    .commit(run.wc, message_file)
                    .map_err(svn_failed(state.name()))?;
                run.report.committed = true;
                CommitState::Done
            }
            CommitState::Skipped => CommitState::Done,
            CommitState::Done => CommitState::Done,
        };

        if next == CommitState::Done {
            if let Some(mut lock) = run.lock.take() {
                lock.release()?;
            }
            self.progress("Done");
        }
        Ok(next)
    }
}
