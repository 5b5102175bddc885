//! core::tool
//!
//! Synchronous invocation of external executables.
//!
//! Both the SVN client and the sync tool are plain command-line programs.
//! They run to completion with captured output; a non-zero exit becomes a
//! [`ToolError::Failed`] carrying everything the program printed, so the
//! operator sees the tool's own diagnosis.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::process::{Command, ExitStatus};

use thiserror::Error;

/// Errors from running an external tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The program could not be started at all.
    #[error("failed to run {invocation}: {source}")]
    Spawn {
        invocation: Invocation,
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("{invocation} failed ({status}){}", format_output(.stdout, .stderr))]
    Failed {
        invocation: Invocation,
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
}

fn format_output(stdout: &str, stderr: &str) -> String {
    let mut out = String::new();
    for text in [stderr.trim_end(), stdout.trim_end()] {
        if !text.is_empty() {
            out.push_str(":\n");
            out.push_str(text);
        }
    }
    out
}

/// A program together with its arguments, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new<I, S>(program: impl AsRef<OsStr>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self {
            program: program.as_ref().to_os_string(),
            args: args.into_iter().map(|a| a.as_ref().to_os_string()).collect(),
        }
    }

    /// Run to completion and return captured stdout.
    ///
    /// # Errors
    ///
    /// - [`ToolError::Spawn`] if the program cannot be started
    /// - [`ToolError::Failed`] if it exits with a non-zero status
    pub fn run(&self) -> Result<String, ToolError> {
        tracing::debug!(command = %self, "running external tool");

        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|source| ToolError::Spawn {
                invocation: self.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            tracing::debug!(command = %self, status = %output.status, "external tool failed");
            return Err(ToolError::Failed {
                invocation: self.clone(),
                status: output.status,
                stdout,
                stderr,
            });
        }

        if !stderr.trim().is_empty() {
            tracing::debug!(command = %self, stderr = %stderr.trim_end(), "external tool stderr");
        }
        Ok(stdout)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}
