//! update-from-svn - Push base language changes to the translation service

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::engine::Orchestrator;
use crate::svn::SvnClient;
use crate::sync::LangSync;

/// Update the working copy and upload it if language files changed.
pub fn update_from_svn<C: SvnClient, L: LangSync>(
    engine: &Orchestrator<C, L>,
    ctx: &Context,
) -> Result<()> {
    let report = engine
        .update_from_repository(&ctx.working_copy, &ctx.project, ctx.force)
        .with_context(|| format!("update-from-svn failed for {}", ctx.project))?;

    tracing::debug!(
        updated = report.updated,
        uploaded = report.uploaded,
        "update-from-svn finished"
    );
    Ok(())
}
