//! ui::output
//!
//! Operator-facing output.
//!
//! # Design
//!
//! langbridge mostly runs from a scheduler whose mail or log collects
//! stdout, so progress lines carry a local timestamp:
//!
//! ```text
//! [2024-03-01 04:00:02] Check SVN
//! [2024-03-01 04:00:05] Done
//! ```
//!
//! Progress respects `--quiet`. Usage reports are always shown on stdout,
//! next to the progress lines; runtime errors always on stderr.
//! Diagnostics for developers go through `tracing` instead (see
//! [`crate::logging`]).

use std::fmt::Display;

use chrono::{DateTime, Local};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Quiet mode - errors only
    Quiet,
    /// Normal mode - progress lines
    #[default]
    Normal,
    /// Debug mode - progress lines plus debug diagnostics
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a timestamped progress line (respects quiet mode).
pub fn info(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", format_info(Local::now(), message));
    }
}

/// Print a usage report to stdout (always shown).
///
/// `report` is complete, trailing newline included.
pub fn usage(report: impl Display) {
    print!("{}", report);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Format a progress line for the given time.
pub fn format_info(now: DateTime<Local>, message: impl Display) -> String {
    format!("[{}] {}", now.format("%Y-%m-%d %H:%M:%S"), message)
}
