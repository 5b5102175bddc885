//! sync::mock
//!
//! Mock sync gateway for deterministic testing.
//!
//! # Design
//!
//! Uploads and downloads are recorded. A download writes the configured
//! credits text to the credits file, like the real tool, and can be linked
//! to a [`MockSvn`] so the files it "downloads" show up as local
//! modifications.
//!
//! # Example
//!
//! ```
//! use langbridge::svn::mock::MockSvn;
//! use langbridge::sync::mock::MockLangSync;
//!
//! let svn = MockSvn::new();
//! let sync = MockLangSync::new()
//!     .with_credits("Alice\nBob\n")
//!     .modifying(&svn, ["german.txt"]);
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{LangSync, SyncError};
use crate::core::types::{ProjectId, WorkingCopy};
use crate::svn::mock::MockSvn;

/// Mock gateway for testing.
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockLangSync {
    inner: Arc<Mutex<MockLangSyncInner>>,
}

#[derive(Debug, Default)]
struct MockLangSyncInner {
    credits: String,
    linked_svn: Option<MockSvn>,
    download_changes: Vec<String>,
    fail_on: Option<SyncFailOn>,
    operations: Vec<SyncOperation>,
}

/// Which operation should fail.
#[derive(Debug, Clone)]
pub enum SyncFailOn {
    Upload(String),
    Download(String),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOperation {
    Upload {
        project: String,
    },
    Download {
        project: String,
        credits_file: PathBuf,
    },
}

impl MockLangSync {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockLangSyncInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Credits text written by every download.
    pub fn with_credits(self, credits: impl Into<String>) -> Self {
        self.lock().credits = credits.into();
        self
    }

    /// Downloads mark `files` as modified in `svn`.
    pub fn modifying<I, S>(self, svn: &MockSvn, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut inner = self.lock();
            inner.linked_svn = Some(svn.clone());
            inner.download_changes = files.into_iter().map(Into::into).collect();
        }
        self
    }

    /// Make an operation fail from now on.
    pub fn fail_on(&self, fail: SyncFailOn) {
        self.lock().fail_on = Some(fail);
    }

    pub fn clear_failure(&self) {
        self.lock().fail_on = None;
    }

    pub fn operations(&self) -> Vec<SyncOperation> {
        self.lock().operations.clone()
    }

    pub fn upload_count(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, SyncOperation::Upload { .. }))
            .count()
    }

    pub fn download_count(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, SyncOperation::Download { .. }))
            .count()
    }
}

impl LangSync for MockLangSync {
    fn upload(&self, _wc: &WorkingCopy, project: &ProjectId) -> Result<(), SyncError> {
        let mut inner = self.lock();
        inner.operations.push(SyncOperation::Upload {
            project: project.to_string(),
        });
        if let Some(SyncFailOn::Upload(message)) = &inner.fail_on {
            return Err(SyncError::Failed {
                operation: "upload",
                message: message.clone(),
            });
        }
        Ok(())
    }

    fn download(
        &self,
        _wc: &WorkingCopy,
        project: &ProjectId,
        credits_file: &Path,
    ) -> Result<(), SyncError> {
        let mut inner = self.lock();
        inner.operations.push(SyncOperation::Download {
            project: project.to_string(),
            credits_file: credits_file.to_path_buf(),
        });
        if let Some(SyncFailOn::Download(message)) = &inner.fail_on {
            return Err(SyncError::Failed {
                operation: "download",
                message: message.clone(),
            });
        }

        std::fs::write(credits_file, &inner.credits).map_err(|e| SyncError::Failed {
            operation: "download",
            message: format!("cannot write {}: {}", credits_file.display(), e),
        })?;
        if let Some(svn) = &inner.linked_svn {
            svn.modify(inner.download_changes.iter().cloned());
        }
        Ok(())
    }
}
