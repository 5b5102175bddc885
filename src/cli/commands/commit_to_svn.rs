//! commit-to-svn - Bring translations from the service back into SVN

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::engine::Orchestrator;
use crate::svn::SvnClient;
use crate::sync::LangSync;

/// Merge, download and commit translations.
pub fn commit_to_svn<C: SvnClient, L: LangSync>(
    engine: &Orchestrator<C, L>,
    ctx: &Context,
) -> Result<()> {
    let report = engine
        .commit_to_repository(&ctx.working_copy, &ctx.project, ctx.dry_run)
        .with_context(|| format!("commit-to-svn failed for {}", ctx.project))?;

    tracing::debug!(
        modified = report.modified.len(),
        committed = report.committed,
        "commit-to-svn finished"
    );
    Ok(())
}
