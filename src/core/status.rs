//! core::status
//!
//! Classification of SVN status and update output lines.
//!
//! # Policy
//!
//! A synced working copy may only ever contain clean files or modified
//! language files. Untracked, added, removed, or conflicted entries, and
//! changes to anything that is not a language file, are never produced by
//! langbridge and must be fixed by a human. [`LineClassifier::parse_status`]
//! therefore fails on the first line it does not recognise.
//!
//! # Patterns
//!
//! With the default extension `.txt`:
//!
//! | Output   | Accepted line                         |
//! |----------|---------------------------------------|
//! | status   | `M` + spaces + `path/name.txt`        |
//! | update   | word + spaces + `path/name.txt`       |
//!
//! Paths may contain word characters, `-`, `/` and `\` only.

use regex::Regex;
use thiserror::Error;

/// Errors from status inspection.
#[derive(Debug, Error)]
pub enum StatusError {
    /// The working copy holds a change langbridge is not allowed to make.
    #[error("invalid checkout status: {line}")]
    InvalidState {
        /// The offending status line, verbatim.
        line: String,
    },

    #[error("invalid language file pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// One classified line of `svn status` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLine<'a> {
    /// A modified language file.
    Modified(&'a str),
    /// Anything else.
    Other(&'a str),
}

/// One classified line of `svn update` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateLine<'a> {
    /// A language file touched by the update (`U`, `G`, `C`, `A`, ...).
    LangFile { action: &'a str, path: &'a str },
    /// Progress or summary text.
    Other,
}

/// Outcome of inspecting a full `svn status` listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSummary {
    /// Modified language files, in output order.
    pub modified: Vec<String>,
}

impl StatusSummary {
    pub fn is_modified(&self) -> bool {
        !self.modified.is_empty()
    }
}

/// Classifies output lines for one language file extension.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    modified: Regex,
    updated: Regex,
}

impl LineClassifier {
    /// Build a classifier for files ending in `lang_file_ext` (e.g. `.txt`).
    pub fn new(lang_file_ext: &str) -> Result<Self, StatusError> {
        let ext = regex::escape(lang_file_ext);
        Ok(Self {
            modified: Regex::new(&format!(r"^M +([\w\-/\\]+{ext})$"))?,
            updated: Regex::new(&format!(r"^(\w+) +([\w\-/\\]+{ext})$"))?,
        })
    }

    pub fn classify_status<'a>(&self, line: &'a str) -> StatusLine<'a> {
        match self.modified.captures(line) {
            Some(caps) => match caps.get(1) {
                Some(path) => StatusLine::Modified(path.as_str()),
                None => StatusLine::Other(line),
            },
            None => StatusLine::Other(line),
        }
    }

    pub fn classify_update<'a>(&self, line: &'a str) -> UpdateLine<'a> {
        match self.updated.captures(line) {
            Some(caps) => match (caps.get(1), caps.get(2)) {
                (Some(action), Some(path)) => UpdateLine::LangFile {
                    action: action.as_str(),
                    path: path.as_str(),
                },
                _ => UpdateLine::Other,
            },
            None => UpdateLine::Other,
        }
    }

    /// Inspect a complete status listing.
    ///
    /// Empty lines are skipped. Every other line must be a modified
    /// language file.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::InvalidState`] with the first offending line.
    pub fn parse_status(&self, output: &str) -> Result<StatusSummary, StatusError> {
        let mut summary = StatusSummary::default();
        for line in output.lines().filter(|l| !l.is_empty()) {
            match self.classify_status(line) {
                StatusLine::Modified(path) => summary.modified.push(path.to_string()),
                StatusLine::Other(raw) => {
                    return Err(StatusError::InvalidState {
                        line: raw.to_string(),
                    })
                }
            }
        }
        Ok(summary)
    }

    /// Language files reported by an update listing.
    pub fn updated_files<'a>(&self, output: &'a str) -> Vec<&'a str> {
        output
            .lines()
            .filter_map(|line| match self.classify_update(line) {
                UpdateLine::LangFile { action, path } => {
                    tracing::debug!(action, path, "language file touched by update");
                    Some(path)
                }
                UpdateLine::Other => None,
            })
            .collect()
    }
}
