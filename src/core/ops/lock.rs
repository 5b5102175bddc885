//! core::ops::lock
//!
//! Process-wide exclusive lock for langbridge operations.
//!
//! # Architecture
//!
//! The process lock ensures only one orchestrated operation touches the
//! working copy and the translation service at a time. Scheduled runs that
//! overlap must be skipped, not queued, so acquisition never blocks.
//!
//! # Storage
//!
//! - A single well-known lock file (see [`Config::lock_file`])
//!
//! The file content is purely diagnostic: the holder writes its pid and the
//! acquisition time. The file is deleted on every release, so a leftover
//! file means the last holder died while holding the lock.
//!
//! # Invariants
//!
//! - Lock must be held for the entire orchestrated operation
//! - Lock is automatically released on drop (RAII pattern)
//! - Lock acquisition is non-blocking (fails fast if locked)
//! - Release removes the lock file before unlocking it
//!
//! # Example
//!
//! ```ignore
//! use langbridge::core::ops::lock::ProcessLock;
//! use std::path::Path;
//!
//! let lock = ProcessLock::acquire(Path::new("/tmp/langbridge.lock"))?;
//!
//! // Perform operations while holding lock
//! // ...
//!
//! // Lock automatically released when dropped
//! drop(lock);
//! ```
//!
//! [`Config::lock_file`]: crate::core::config::Config::lock_file

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("lock {} is held by another langbridge process", .path.display())]
    Busy {
        /// The contended lock file.
        path: PathBuf,
    },

    /// Failed to create or open the lock file.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// Failed to acquire the OS lock.
    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),

    /// Failed to release the lock.
    #[error("failed to release lock: {0}")]
    ReleaseFailed(String),

    /// I/O error while writing the holder record.
    #[error("lock i/o error: {0}")]
    IoError(#[from] std::io::Error),
}

/// An exclusive, process-wide lock backed by an advisory file lock.
///
/// The lock is released when this guard is dropped, so a failing
/// operation body can never leave it held.
#[derive(Debug)]
pub struct ProcessLock {
    /// Path to the lock file.
    path: PathBuf,
    /// The open file handle with the lock held.
    /// When this is Some, we hold the lock.
    file: Option<File>,
}

impl ProcessLock {
    /// Attempt to acquire the lock at `path`.
    ///
    /// Uses OS-level file locking via `fs2`, which works across processes.
    /// If another process holds the lock this returns [`LockError::Busy`]
    /// immediately.
    ///
    /// On success the lock file is truncated and the holder record
    /// `pid:<pid> date:<timestamp>` is written to it.
    ///
    /// # Errors
    ///
    /// - [`LockError::Busy`] if another process holds the lock
    /// - [`LockError::CreateFailed`] if the lock file cannot be opened
    /// - [`LockError::AcquireFailed`] if the OS lock cannot be acquired
    /// - [`LockError::IoError`] if the holder record cannot be written
    pub fn acquire(path: &Path) -> Result<Self, LockError> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| {
                LockError::CreateFailed(format!("cannot open {}: {}", path.display(), e))
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => {}
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                return Err(LockError::Busy {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(LockError::AcquireFailed(e.to_string())),
        }

        // From here on the guard owns the lock, so any failure below
        // still releases it through Drop.
        let mut lock = Self {
            path: path.to_path_buf(),
            file: Some(file),
        };
        lock.write_holder_record()?;

        tracing::debug!(path = %lock.path.display(), "acquired process lock");
        Ok(lock)
    }

    /// Check if the lock is currently held.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock explicitly.
    ///
    /// Deletes the lock file, unlocks, and closes the handle. Calling this
    /// more than once is a no-op after the first call.
    pub fn release(&mut self) -> Result<(), LockError> {
        if let Some(file) = self.file.take() {
            let removed = fs::remove_file(&self.path);
            let unlocked = file.unlock();
            drop(file);

            removed.map_err(|e| {
                LockError::ReleaseFailed(format!("cannot remove {}: {}", self.path.display(), e))
            })?;
            unlocked.map_err(|e| LockError::ReleaseFailed(e.to_string()))?;
            tracing::debug!(path = %self.path.display(), "released process lock");
        }
        Ok(())
    }

    fn write_holder_record(&mut self) -> Result<(), LockError> {
        if let Some(file) = self.file.as_mut() {
            file.set_len(0)?;
            writeln!(
                file,
                "pid:{} date:{}",
                std::process::id(),
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
            )?;
            file.flush()?;
        }
        Ok(())
    }
}

impl Drop for ProcessLock {
    fn drop(&mut self) {
        // Best-effort release on drop - ignore errors since we're dropping
        if let Some(file) = self.file.take() {
            let _ = fs::remove_file(&self.path);
            let _ = file.unlock();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lock_path(dir: &TempDir) -> PathBuf {
        dir.path().join("langbridge.lock")
    }

    #[test]
    fn lock_acquire_succeeds() {
        let temp = TempDir::new().expect("create temp dir");
        let path = lock_path(&temp);

        let lock = ProcessLock::acquire(&path).expect("acquire lock");
        assert!(lock.is_held());
        assert!(lock.path().exists());
    }

    #[test]
    fn lock_file_records_holder() {
        let temp = TempDir::new().expect("create temp dir");
        let path = lock_path(&temp);
        fs::write(&path, "stale content from a crashed run\n").unwrap();

        let _lock = ProcessLock::acquire(&path).expect("acquire lock");

        let record = fs::read_to_string(&path).unwrap();
        assert!(record.starts_with(&format!("pid:{} date:", std::process::id())));
        assert!(!record.contains("stale"));
        assert_eq!(record.lines().count(), 1);
    }

    #[test]
    fn lock_prevents_second_acquire() {
        let temp = TempDir::new().expect("create temp dir");
        let path = lock_path(&temp);

        let lock1 = ProcessLock::acquire(&path).expect("first acquire");
        assert!(lock1.is_held());

        let result = ProcessLock::acquire(&path);
        assert!(matches!(result, Err(LockError::Busy { .. })));
    }

    #[test]
    fn busy_acquire_leaves_holder_record_intact() {
        let temp = TempDir::new().expect("create temp dir");
        let path = lock_path(&temp);

        let _lock1 = ProcessLock::acquire(&path).expect("first acquire");
        let before = fs::read_to_string(&path).unwrap();

        assert!(ProcessLock::acquire(&path).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn lock_released_on_drop() {
        let temp = TempDir::new().expect("create temp dir");
        let path = lock_path(&temp);

        {
            let lock = ProcessLock::acquire(&path).expect("first acquire");
            assert!(lock.is_held());
        }
        assert!(!path.exists());

        let lock2 = ProcessLock::acquire(&path).expect("second acquire");
        assert!(lock2.is_held());
    }

    #[test]
    fn lock_released_explicitly_removes_file() {
        let temp = TempDir::new().expect("create temp dir");
        let path = lock_path(&temp);

        let mut lock = ProcessLock::acquire(&path).expect("acquire");
        lock.release().expect("release");
        assert!(!lock.is_held());
        assert!(!path.exists());

        let lock2 = ProcessLock::acquire(&path).expect("reacquire");
        assert!(lock2.is_held());
    }

    #[test]
    fn multiple_release_calls_are_safe() {
        let temp = TempDir::new().expect("create temp dir");
        let path = lock_path(&temp);

        let mut lock = ProcessLock::acquire(&path).expect("acquire");

        lock.release().expect("first release");
        lock.release().expect("second release should be ok");
        assert!(!lock.is_held());
    }

    #[test]
    fn missing_parent_directory_is_create_error() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("no-such-dir").join("langbridge.lock");

        let result = ProcessLock::acquire(&path);
        assert!(matches!(result, Err(LockError::CreateFailed(_))));
    }

    #[test]
    fn error_display_formatting() {
        let err = LockError::Busy {
            path: PathBuf::from("/tmp/x.lock"),
        };
        assert!(err.to_string().contains("held by another"));
        assert!(err.to_string().contains("/tmp/x.lock"));

        let err = LockError::CreateFailed("test".into());
        assert!(err.to_string().contains("create"));

        let err = LockError::ReleaseFailed("test".into());
        assert!(err.to_string().contains("release"));
    }
}
