//! svn::client
//!
//! Raw SVN client operations.
//!
//! # Design
//!
//! The [`SvnClient`] trait is the seam between langbridge and the `svn`
//! executable. Implementations only run commands and hand back their
//! output; interpreting that output is the job of [`super::SvnRepository`].
//! Every command runs with `--non-interactive` so a scheduled run can
//! never hang on a prompt.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::status::StatusError;
use crate::core::tool::{Invocation, ToolError};

/// Errors from SVN operations.
#[derive(Debug, Error)]
pub enum SvnError {
    /// The `svn` executable failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// The working copy holds changes outside the allowed set.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// An operation failed without a process exit status (mock clients).
    #[error("svn {operation} failed: {message}")]
    Failed {
        operation: &'static str,
        message: String,
    },
}

/// Raw SVN operations scoped to one working copy path.
pub trait SvnClient {
    /// `svn status`: returns the listing.
    fn status(&self, working_copy: &Path) -> Result<String, SvnError>;

    /// `svn revert -R`: discard all local modifications.
    fn revert(&self, working_copy: &Path) -> Result<(), SvnError>;

    /// `svn update`: returns the listing of touched files.
    fn update(&self, working_copy: &Path) -> Result<String, SvnError>;

    /// `svn commit` as `username` with the message read from `message_file`.
    fn commit(&self, working_copy: &Path, username: &str, message_file: &Path)
        -> Result<(), SvnError>;
}

/// [`SvnClient`] backed by the `svn` command-line client.
#[derive(Debug, Clone)]
pub struct CommandSvn {
    program: PathBuf,
}

impl CommandSvn {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&OsStr]) -> Result<String, SvnError> {
        Ok(Invocation::new(&self.program, args).run()?)
    }
}

impl Default for CommandSvn {
    fn default() -> Self {
        Self::new("svn")
    }
}

impl SvnClient for CommandSvn {
    fn status(&self, working_copy: &Path) -> Result<String, SvnError> {
        self.run(&[
            OsStr::new("status"),
            OsStr::new("--non-interactive"),
            working_copy.as_os_str(),
        ])
    }

    fn revert(&self, working_copy: &Path) -> Result<(), SvnError> {
        self.run(&[
            OsStr::new("revert"),
            OsStr::new("--non-interactive"),
            OsStr::new("-R"),
            working_copy.as_os_str(),
        ])?;
        Ok(())
    }

    fn update(&self, working_copy: &Path) -> Result<String, SvnError> {
        self.run(&[
            OsStr::new("update"),
            OsStr::new("--non-interactive"),
            working_copy.as_os_str(),
        ])
    }

    fn commit(
        &self,
        working_copy: &Path,
        username: &str,
        message_file: &Path,
    ) -> Result<(), SvnError> {
        self.run(&[
            OsStr::new("commit"),
            OsStr::new("--non-interactive"),
            OsStr::new("--username"),
            OsStr::new(username),
            OsStr::new("-F"),
            message_file.as_os_str(),
            working_copy.as_os_str(),
        ])?;
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    /// Install a fake `svn` that logs its arguments and prints `stdout`.
    fn fake_svn(dir: &TempDir, stdout: &str, exit_code: i32) -> PathBuf {
        let script = dir.path().join("svn");
        let log = dir.path().join("svn.log");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\necho \"$@\" >> '{}'\nprintf '%s' '{}'\nexit {}\n",
                log.display(),
                stdout,
                exit_code
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    fn logged_args(dir: &TempDir) -> String {
        fs::read_to_string(dir.path().join("svn.log")).unwrap()
    }

    #[test]
    fn status_passes_working_copy() {
        let dir = TempDir::new().unwrap();
        let svn = CommandSvn::new(fake_svn(&dir, "M       german.txt", 0));

        let out = svn.status(Path::new("/srv/lang")).unwrap();
        assert_eq!(out, "M       german.txt");
        assert_eq!(logged_args(&dir), "status --non-interactive /srv/lang\n");
    }

    #[test]
    fn revert_is_recursive() {
        let dir = TempDir::new().unwrap();
        let svn = CommandSvn::new(fake_svn(&dir, "", 0));

        svn.revert(Path::new("/srv/lang")).unwrap();
        assert_eq!(logged_args(&dir), "revert --non-interactive -R /srv/lang\n");
    }

    #[test]
    fn commit_uses_account_and_message_file() {
        let dir = TempDir::new().unwrap();
        let svn = CommandSvn::new(fake_svn(&dir, "", 0));

        svn.commit(
            Path::new("/srv/lang"),
            "translators",
            Path::new("/tmp/langbridge.msg"),
        )
        .unwrap();
        assert_eq!(
            logged_args(&dir),
            "commit --non-interactive --username translators -F /tmp/langbridge.msg /srv/lang\n"
        );
    }

    #[test]
    fn failing_update_is_tool_error() {
        let dir = TempDir::new().unwrap();
        let svn = CommandSvn::new(fake_svn(&dir, "E155004: locked", 1));

        let err = svn.update(Path::new("/srv/lang")).unwrap_err();
        assert!(matches!(err, SvnError::Tool(ToolError::Failed { .. })));
        assert!(err.to_string().contains("E155004"));
    }
}
