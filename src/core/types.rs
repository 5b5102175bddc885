//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ProjectId`] - Translation service project identifier
//! - [`WorkingCopy`] - Path to an SVN working copy holding language files
//!
//! # Validation
//!
//! These types enforce validity at construction time. Both end up as
//! arguments of external commands, so anything that could be mistaken for
//! an option is rejected up front.
//!
//! # Examples
//!
//! ```
//! use langbridge::core::types::ProjectId;
//!
//! let project = ProjectId::new("openttd-trunk").unwrap();
//! assert_eq!(project.as_str(), "openttd-trunk");
//!
//! assert!(ProjectId::new("").is_err());
//! assert!(ProjectId::new("--base-url").is_err());
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid project id: {0}")]
    InvalidProjectId(String),

    #[error("invalid working copy: {0}")]
    InvalidWorkingCopy(String),
}

/// An opaque project identifier on the translation service.
///
/// The value is not interpreted. It is passed as the argument of the sync
/// tool's `--project` option, so it must be non-empty and may not start
/// with `-`, where the tool would parse it as another option.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a new validated project id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidProjectId` if the id is empty or starts
    /// with `-`.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::InvalidProjectId(
                "project id cannot be empty".into(),
            ));
        }
        if id.starts_with('-') {
            return Err(TypeError::InvalidProjectId(format!(
                "'{}' cannot start with '-'",
                id
            )));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path to an SVN working copy containing language files.
///
/// The working copy root is the language directory handed to the sync
/// tool; unstable translations live in a subdirectory of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingCopy(PathBuf);

impl WorkingCopy {
    /// Create a working copy handle for an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidWorkingCopy` if the path is empty or is
    /// not an existing directory.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, TypeError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(TypeError::InvalidWorkingCopy(
                "working copy path cannot be empty".into(),
            ));
        }
        if path.to_string_lossy().starts_with('-') {
            return Err(TypeError::InvalidWorkingCopy(format!(
                "'{}' cannot start with '-'",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(TypeError::InvalidWorkingCopy(format!(
                "'{}' is not a directory",
                path.display()
            )));
        }
        Ok(Self(path))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Directory holding unstable (unfinished) translations.
    pub fn unstable_dir(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl fmt::Display for WorkingCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
