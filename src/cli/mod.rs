//! cli
//!
//! Command-line interface layer for langbridge.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and flags
//! - Validate the project and working copy before anything runs
//! - Load configuration and wire the real SVN client and sync tool
//! - Delegate each requested operation to the engine, in fixed order
//!
//! # Exit Codes
//!
//! Usage errors (malformed invocation) exit 2 and touch nothing. They are
//! reported as [`UsageError`] so `main` can tell them apart from runtime
//! failures, which exit 1. Usage errors are printed to stdout, clap's own
//! included; runtime failures go to stderr.

pub mod args;
pub mod commands;

pub use args::{Cli, Operation};

use anyhow::{Context as _, Result};
use thiserror::Error;

use crate::core::config::Config;
use crate::core::status::LineClassifier;
use crate::core::types::{ProjectId, TypeError, WorkingCopy};
use crate::engine::{EngineSettings, Orchestrator};
use crate::logging;
use crate::svn::{CommandSvn, SvnRepository};
use crate::sync::LangSyncTool;
use crate::ui::output::Verbosity;

/// Malformed invocation. Exit code 2.
#[derive(Debug, Error)]
pub enum UsageError {
    /// Rejected by the argument parser; holds clap's rendered report.
    #[error("{}", .0.trim_end())]
    Syntax(String),

    #[error("--project is required for {operation}")]
    MissingProject { operation: &'static str },

    #[error("--working-copy is required for {operation}")]
    MissingWorkingCopy { operation: &'static str },

    #[error(transparent)]
    InvalidArgument(#[from] TypeError),
}

impl UsageError {
    /// Full report for the operator, ending in a newline.
    pub fn render(&self) -> String {
        match self {
            UsageError::Syntax(report) => format!("{}\n", report.trim_end()),
            other => format!("error: {}\n\nFor more information, try '--help'.\n", other),
        }
    }
}

impl From<clap::Error> for UsageError {
    fn from(err: clap::Error) -> Self {
        UsageError::Syntax(err.render().to_string())
    }
}

/// Validated inputs shared by all operations of one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub project: ProjectId,
    pub working_copy: WorkingCopy,
    pub force: bool,
    pub dry_run: bool,
}

impl Context {
    /// Validate the target flags for the first requested operation.
    pub fn from_cli(cli: &Cli, operation: Operation) -> Result<Self, UsageError> {
        let project = cli
            .project
            .as_deref()
            .ok_or(UsageError::MissingProject {
                operation: operation.name(),
            })?;
        let working_copy = cli
            .working_copy
            .as_deref()
            .ok_or(UsageError::MissingWorkingCopy {
                operation: operation.name(),
            })?;

        Ok(Self {
            project: ProjectId::new(project)?,
            working_copy: WorkingCopy::new(working_copy)?,
            force: cli.force,
            dry_run: cli.dry_run,
        })
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => {
            err.print().context("cannot print help")?;
            return Ok(());
        }
        Err(err) => return Err(UsageError::from(err).into()),
    };
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    logging::init(verbosity);

    let operations = cli.planned_operations();
    let Some(&first) = operations.first() else {
        tracing::debug!("no operations requested");
        return Ok(());
    };
    let ctx = Context::from_cli(&cli, first)?;

    let config = Config::load(cli.config.as_deref()).context("cannot load configuration")?;
    match config.path() {
        Some(path) => tracing::debug!(path = %path.display(), "using configuration file"),
        None => tracing::debug!("no configuration file, using defaults"),
    }
    let engine = build_orchestrator(&config, verbosity)?;

    for operation in operations {
        commands::dispatch(operation, &engine, &ctx)?;
    }
    Ok(())
}

/// Wire the command-line SVN client and sync tool from configuration.
pub fn build_orchestrator(
    config: &Config,
    verbosity: Verbosity,
) -> Result<Orchestrator<CommandSvn, LangSyncTool>> {
    let classifier = LineClassifier::new(config.lang_file_ext())
        .context("cannot build language file patterns")?;
    let repo = SvnRepository::new(
        CommandSvn::new(config.svn_command()),
        classifier,
        config.svn_username(),
    );
    let sync = LangSyncTool::from_config(config);

    Ok(Orchestrator::new(
        repo,
        sync,
        EngineSettings::from_config(config, verbosity),
    ))
}
