//! cli::commands
//!
//! Operation dispatch and handlers.
//!
//! # Architecture
//!
//! Each handler:
//! 1. Calls the engine to run the procedure
//! 2. Attaches the operation and project to any error
//! 3. Records the outcome for diagnostics
//!
//! Handlers are generic over the SVN client and sync gateway so the
//! dispatch path can be exercised against the in-memory mocks.

mod commit_to_svn;
mod update_from_svn;

pub use commit_to_svn::commit_to_svn;
pub use update_from_svn::update_from_svn;

use anyhow::Result;

use super::{Context, Operation};
use crate::engine::Orchestrator;
use crate::svn::SvnClient;
use crate::sync::LangSync;

/// Run one operation.
pub fn dispatch<C: SvnClient, L: LangSync>(
    operation: Operation,
    engine: &Orchestrator<C, L>,
    ctx: &Context,
) -> Result<()> {
    match operation {
        Operation::UpdateFromSvn => update_from_svn(engine, ctx),
        Operation::CommitToSvn => commit_to_svn(engine, ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::Harness;
    use crate::svn::mock::SvnOperation;
    use crate::sync::mock::{MockLangSync, SyncOperation};

    fn context(h: &Harness, force: bool, dry_run: bool) -> Context {
        Context {
            project: h.project.clone(),
            working_copy: h.wc.clone(),
            force,
            dry_run,
        }
    }

    fn harness() -> Harness {
        Harness::new(|svn| {
            MockLangSync::new()
                .with_credits("Alice\n")
                .modifying(svn, ["german.txt"])
        })
    }

    #[test]
    fn update_then_commit() {
        let h = harness();
        h.svn.push_upstream(["english.txt"]);
        let ctx = context(&h, false, false);

        dispatch(Operation::UpdateFromSvn, &h.engine, &ctx).unwrap();
        dispatch(Operation::CommitToSvn, &h.engine, &ctx).unwrap();

        // One upload from the update, one from the commit's merge step.
        assert_eq!(h.sync.upload_count(), 2);
        assert!(matches!(
            h.sync.operations().last(),
            Some(SyncOperation::Download { .. })
        ));
        assert_eq!(
            h.svn.commits(),
            vec![SvnOperation::Commit {
                username: "translators".into(),
                message: "-Update from Eints:\nAlice\n".into(),
            }]
        );
    }

    #[test]
    fn dry_run_flag_reaches_engine() {
        let h = harness();
        dispatch(Operation::CommitToSvn, &h.engine, &context(&h, false, true)).unwrap();
        assert!(h.svn.commits().is_empty());
        assert_eq!(h.svn.modified(), vec!["german.txt"]);
    }

    #[test]
    fn force_flag_reaches_engine() {
        let h = harness();
        dispatch(Operation::UpdateFromSvn, &h.engine, &context(&h, true, false)).unwrap();
        assert_eq!(h.sync.upload_count(), 1);
    }

    #[test]
    fn errors_name_operation_and_project() {
        let h = harness();
        h.svn.add_status_line("A       new.txt");

        let err = dispatch(Operation::UpdateFromSvn, &h.engine, &context(&h, false, false))
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.starts_with("update-from-svn failed for opengfx"));
        assert!(message.contains("A       new.txt"));
    }
}
