//! svn::mock
//!
//! In-memory SVN client for deterministic testing.
//!
//! # Design
//!
//! The mock keeps a tiny model of a working copy: the set of locally
//! modified files plus a queue of upstream changes waiting to be pulled.
//! Status and update output is rendered in the same layout the real `svn`
//! client uses, so tests exercise the real line classifier.
//!
//! # Example
//!
//! ```
//! use langbridge::svn::mock::MockSvn;
//! use langbridge::svn::SvnClient;
//! use std::path::Path;
//!
//! let svn = MockSvn::new();
//! svn.push_upstream(["german.txt"]);
//!
//! let out = svn.update(Path::new("/wc")).unwrap();
//! assert!(out.contains("U    german.txt"));
//!
//! let out = svn.update(Path::new("/wc")).unwrap();
//! assert!(out.contains("At revision"));
//! ```

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::client::{SvnClient, SvnError};

/// Mock SVN client for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockSvn {
    inner: Arc<Mutex<MockSvnInner>>,
}

#[derive(Debug, Default)]
struct MockSvnInner {
    /// Locally modified files, in modification order.
    modified: Vec<String>,
    /// Extra raw status lines (untracked files and the like).
    extra_status: Vec<String>,
    /// Upstream changesets not yet pulled.
    upstream: VecDeque<Vec<String>>,
    revision: u64,
    fail_on: Option<SvnFailOn>,
    operations: Vec<SvnOperation>,
}

/// Which operation should fail.
#[derive(Debug, Clone)]
pub enum SvnFailOn {
    Status(String),
    Revert(String),
    Update(String),
    Commit(String),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvnOperation {
    Status,
    Revert,
    Update,
    Commit {
        username: String,
        /// Content of the message file at commit time.
        message: String,
    },
}

impl MockSvn {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockSvnInner> {
        // A panicking test thread must not hide the state from the others.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Mark files as locally modified (what a download does).
    pub fn modify<I, S>(&self, files: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut inner = self.lock();
        for file in files {
            let file = file.into();
            if !inner.modified.contains(&file) {
                inner.modified.push(file);
            }
        }
    }

    /// Add a raw line to every status listing.
    pub fn add_status_line(&self, line: impl Into<String>) {
        self.lock().extra_status.push(line.into());
    }

    /// Queue an upstream commit touching `files`.
    pub fn push_upstream<I, S>(&self, files: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let files = files.into_iter().map(Into::into).collect();
        self.lock().upstream.push_back(files);
    }

    /// Make an operation fail from now on.
    pub fn fail_on(&self, fail: SvnFailOn) {
        self.lock().fail_on = Some(fail);
    }

    /// Locally modified files.
    pub fn modified(&self) -> Vec<String> {
        self.lock().modified.clone()
    }

    pub fn operations(&self) -> Vec<SvnOperation> {
        self.lock().operations.clone()
    }

    pub fn commits(&self) -> Vec<SvnOperation> {
        self.operations()
            .into_iter()
            .filter(|op| matches!(op, SvnOperation::Commit { .. }))
            .collect()
    }
}

impl SvnClient for MockSvn {
    fn status(&self, _working_copy: &Path) -> Result<String, SvnError> {
        let mut inner = self.lock();
        inner.operations.push(SvnOperation::Status);
        if let Some(SvnFailOn::Status(message)) = &inner.fail_on {
            return Err(SvnError::Failed {
                operation: "status",
                message: message.clone(),
            });
        }

        let mut out = String::new();
        for file in &inner.modified {
            out.push_str(&format!("M       {}\n", file));
        }
        for line in &inner.extra_status {
            out.push_str(line);
            out.push('\n');
        }
        Ok(out)
    }

    fn revert(&self, _working_copy: &Path) -> Result<(), SvnError> {
        let mut inner = self.lock();
        inner.operations.push(SvnOperation::Revert);
        if let Some(SvnFailOn::Revert(message)) = &inner.fail_on {
            return Err(SvnError::Failed {
                operation: "revert",
                message: message.clone(),
            });
        }
        inner.modified.clear();
        Ok(())
    }

    fn update(&self, working_copy: &Path) -> Result<String, SvnError> {
        let mut inner = self.lock();
        inner.operations.push(SvnOperation::Update);
        if let Some(SvnFailOn::Update(message)) = &inner.fail_on {
            return Err(SvnError::Failed {
                operation: "update",
                message: message.clone(),
            });
        }

        let mut out = format!("Updating '{}':\n", working_copy.display());
        let mut touched = false;
        while let Some(files) = inner.upstream.pop_front() {
            inner.revision += 1;
            for file in files {
                out.push_str(&format!("U    {}\n", file));
                touched = true;
            }
        }
        if touched {
            out.push_str(&format!("Updated to revision {}.\n", inner.revision));
        } else {
            out.push_str(&format!("At revision {}.\n", inner.revision));
        }
        Ok(out)
    }

    fn commit(
        &self,
        _working_copy: &Path,
        username: &str,
        message_file: &Path,
    ) -> Result<(), SvnError> {
        let mut inner = self.lock();
        let message = std::fs::read_to_string(message_file).unwrap_or_default();
        inner.operations.push(SvnOperation::Commit {
            username: username.to_string(),
            message,
        });
        if let Some(SvnFailOn::Commit(message)) = &inner.fail_on {
            return Err(SvnError::Failed {
                operation: "commit",
                message: message.clone(),
            });
        }
        inner.modified.clear();
        inner.revision += 1;
        Ok(())
    }
}
