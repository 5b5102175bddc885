//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--project <ID>`: Project on the translation service
//! - `--working-copy <PATH>`: SVN working copy holding the language files
//! - `--force`: Upload even when SVN brought no changes
//! - `--dry-run`: Stop before committing
//! - `--config <PATH>`: Configuration file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: No progress output
//!
//! `--project` and `--working-copy` may be given at most once; clap rejects
//! repeats with a usage error. Parse errors are not printed here: the caller
//! turns them into [`crate::cli::UsageError`], which goes to stdout.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// langbridge - Synchronize SVN language files with a translation service
#[derive(Parser, Debug)]
#[command(name = "langbridge")]
#[command(
    author,
    version,
    about,
    long_about = "Synchronize language files between an SVN working copy and a \
        translation service.\n\n\
        update-from-svn pulls the working copy and uploads changed language files \
        to the service. commit-to-svn merges translations made on the service back \
        into the working copy and commits them, crediting the translators.\n\n\
        Only one langbridge procedure runs at a time; an overlapping run fails \
        immediately instead of waiting.",
    after_help = "\
EXAMPLES:
    # Hourly: push base language changes to the service
    langbridge --project=opengfx --working-copy=/srv/lang/opengfx update-from-svn

    # Nightly: bring translations back into SVN
    langbridge --project=opengfx --working-copy=/srv/lang/opengfx \\
        update-from-svn commit-to-svn

    # See what would be committed without committing
    langbridge --project=opengfx --working-copy=/srv/lang/opengfx --dry-run commit-to-svn"
)]
pub struct Cli {
    /// Upload to the service even if SVN brought no changes
    #[arg(long)]
    pub force: bool,

    /// Prepare everything but do not commit to SVN
    #[arg(long)]
    pub dry_run: bool,

    /// Project identifier on the translation service
    #[arg(long, value_name = "ID")]
    pub project: Option<String>,

    /// SVN working copy holding the language files
    #[arg(long, value_name = "PATH")]
    pub working_copy: Option<PathBuf>,

    /// Configuration file (overrides the standard locations)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// No progress output; errors are still reported
    #[arg(short, long)]
    pub quiet: bool,

    /// Operations to perform; update always runs before commit
    #[arg(value_enum, value_name = "OPERATION")]
    pub operations: Vec<Operation>,
}

impl Cli {
    /// Parse command-line arguments.
    ///
    /// `--help` and `--version` also come back as errors; see
    /// [`clap::Error::use_stderr`].
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Parser::try_parse()
    }

    /// Requested operations in execution order, each at most once.
    pub fn planned_operations(&self) -> Vec<Operation> {
        let mut ops = self.operations.clone();
        ops.sort();
        ops.dedup();
        ops
    }
}

/// Available operations.
///
/// Declaration order is execution order.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    /// Update the working copy and upload changed language files
    #[value(name = "update-from-svn")]
    UpdateFromSvn,

    /// Merge translations from the service and commit them to SVN
    #[value(name = "commit-to-svn")]
    CommitToSvn,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::UpdateFromSvn => "update-from-svn",
            Operation::CommitToSvn => "commit-to-svn",
        }
    }
}
