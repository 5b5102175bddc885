//! engine::update
//!
//! Update-from-repository: pull the working copy and, if language files
//! changed upstream (or the caller forces it), upload them to the
//! translation service.

use std::fmt;

use super::{svn_failed, sync_failed, EngineError, Orchestrator};
use crate::core::ops::lock::ProcessLock;
use crate::core::types::{ProjectId, WorkingCopy};
use crate::svn::SvnClient;
use crate::sync::LangSync;

/// States of the update-from-repository machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateState {
    Locking,
    Updating,
    Uploading,
    Skipped,
    Done,
}

impl UpdateState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Locking => "locking",
            Self::Updating => "updating",
            Self::Uploading => "uploading",
            Self::Skipped => "skipped",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for UpdateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an update run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// States visited, in order.
    pub states: Vec<UpdateState>,
    /// Whether the update touched language files.
    pub updated: bool,
    /// Whether anything was uploaded.
    pub uploaded: bool,
}

/// Mutable state of one run.
struct UpdateRun<'a> {
    wc: &'a WorkingCopy,
    project: &'a ProjectId,
    force: bool,
    lock: Option<ProcessLock>,
    report: UpdateReport,
}

impl<C: SvnClient, L: LangSync> Orchestrator<C, L> {
    /// Update the working copy and upload changed language files.
    ///
    /// With `force` the upload happens even when the update brought no
    /// language file changes.
    ///
    /// # Errors
    ///
    /// Fails fast with a lock error if another run is active; otherwise
    /// returns the first failing step. The lock is released either way.
    pub fn update_from_repository(
        &self,
        wc: &WorkingCopy,
        project: &ProjectId,
        force: bool,
    ) -> Result<UpdateReport, EngineError> {
        let mut run = UpdateRun {
            wc,
            project,
            force,
            lock: None,
            report: UpdateReport::default(),
        };

        let mut state = UpdateState::Locking;
        loop {
            run.report.states.push(state);
            tracing::info!(state = %state, working_copy = %wc, "update-from-repository");
            if state == UpdateState::Done {
                break;
            }
            state = self.update_step(state, &mut run)?;
        }

        Ok(run.report)
    }

    fn update_step(
        &self,
        state: UpdateState,
        run: &mut UpdateRun<'_>,
    ) -> Result<UpdateState, EngineError> {
        let next = match state {
            UpdateState::Locking => {
                run.lock = Some(self.acquire_lock()?);
                UpdateState::Updating
            }
            UpdateState::Updating => {
                self.progress("Check SVN");
                run.report.updated = self
                    .repo
                    .update(run.wc)
                    .map_err(svn_failed(state.name()))?;
                if run.report.updated || run.force {
                    UpdateState::Uploading
                } else {
                    UpdateState::Skipped
                }
            }
            UpdateState::Uploading => {
                self.progress("Upload translations");
                self.sync
                    .upload(run.wc, run.project)
                    .map_err(sync_failed(state.name()))?;
                run.report.uploaded = true;
                UpdateState::Done
            }
            UpdateState::Skipped => UpdateState::Done,
            UpdateState::Done => UpdateState::Done,
        };

        if next == UpdateState::Done {
            if let Some(mut lock) = run.lock.take() {
                lock.release()?;
            }
            self.progress("Done");
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::Harness;
    use crate::svn::mock::{SvnFailOn, SvnOperation};
    use crate::sync::mock::{MockLangSync, SyncFailOn};

    fn harness() -> Harness {
        Harness::new(|_| MockLangSync::new())
    }

    #[test]
    fn upstream_change_is_uploaded() {
        let h = harness();
        h.svn.push_upstream(["german.txt"]);

        let report = h.engine.update_from_repository(&h.wc, &h.project, false).unwrap();
        assert_eq!(
            report.states,
            vec![
                UpdateState::Locking,
                UpdateState::Updating,
                UpdateState::Uploading,
                UpdateState::Done
            ]
        );
        assert!(report.updated);
        assert!(report.uploaded);
        assert_eq!(h.sync.upload_count(), 1);
    }

    #[test]
    fn no_change_skips_upload() {
        let h = harness();

        let report = h.engine.update_from_repository(&h.wc, &h.project, false).unwrap();
        assert_eq!(
            report.states,
            vec![
                UpdateState::Locking,
                UpdateState::Updating,
                UpdateState::Skipped,
                UpdateState::Done
            ]
        );
        assert!(!report.uploaded);
        assert_eq!(h.sync.upload_count(), 0);
    }

    #[test]
    fn force_uploads_without_change() {
        let h = harness();

        let report = h.engine.update_from_repository(&h.wc, &h.project, true).unwrap();
        assert!(!report.updated);
        assert!(report.uploaded);
        assert_eq!(h.sync.upload_count(), 1);
    }

    #[test]
    fn repeated_run_uploads_once() {
        let h = harness();
        h.svn.push_upstream(["german.txt"]);

        let first = h.engine.update_from_repository(&h.wc, &h.project, false).unwrap();
        let second = h.engine.update_from_repository(&h.wc, &h.project, false).unwrap();

        assert!(first.uploaded);
        assert!(!second.uploaded);
        assert_eq!(h.sync.upload_count(), 1);
        assert!(h.svn.modified().is_empty());
    }

    #[test]
    fn local_modifications_are_reverted() {
        let h = harness();
        h.svn.modify(["german.txt"]);

        h.engine.update_from_repository(&h.wc, &h.project, false).unwrap();
        assert!(h.svn.operations().contains(&SvnOperation::Revert));
        assert!(h.svn.modified().is_empty());
    }

    #[test]
    fn lock_released_after_success() {
        let h = harness();
        h.engine.update_from_repository(&h.wc, &h.project, false).unwrap();
        assert!(!h.lock_file().exists());
    }

    #[test]
    fn busy_lock_fails_without_touching_anything() {
        let h = harness();
        let _held = ProcessLock::acquire(&h.lock_file()).unwrap();

        let err = h
            .engine
            .update_from_repository(&h.wc, &h.project, true)
            .unwrap_err();
        assert!(err.is_lock_busy());
        assert!(h.svn.operations().is_empty());
        assert_eq!(h.sync.upload_count(), 0);
    }

    #[test]
    fn invalid_working_copy_aborts_and_releases_lock() {
        let h = harness();
        h.svn.add_status_line("?       stray.txt");

        let err = h
            .engine
            .update_from_repository(&h.wc, &h.project, true)
            .unwrap_err();
        assert!(err.is_invalid_state());
        assert_eq!(h.sync.upload_count(), 0);
        assert!(!h.lock_file().exists());
    }

    #[test]
    fn svn_failure_names_phase() {
        let h = harness();
        h.svn.fail_on(SvnFailOn::Update("E170013: unable to connect".into()));

        let err = h
            .engine
            .update_from_repository(&h.wc, &h.project, false)
            .unwrap_err();
        assert_eq!(err.to_string(), "updating failed");
        assert!(matches!(err, EngineError::Svn { phase: "updating", .. }));
        assert!(!h.lock_file().exists());
    }

    #[test]
    fn upload_failure_releases_lock() {
        let h = harness();
        h.sync.fail_on(SyncFailOn::Upload("HTTP 500".into()));

        let err = h
            .engine
            .update_from_repository(&h.wc, &h.project, true)
            .unwrap_err();
        assert!(matches!(err, EngineError::Sync { phase: "uploading", .. }));
        assert!(!h.lock_file().exists());

        // A re-run is possible right away.
        h.sync.clear_failure();
        h.engine.update_from_repository(&h.wc, &h.project, true).unwrap();
    }
}
