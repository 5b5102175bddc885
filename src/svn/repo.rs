//! svn::repo
//!
//! Working copy operations with langbridge's state policy applied.

use std::path::Path;

use super::client::{SvnClient, SvnError};
use crate::core::status::{LineClassifier, StatusSummary};
use crate::core::types::WorkingCopy;

/// SVN operations on a language working copy.
///
/// Wraps a raw [`SvnClient`] and interprets its output with a
/// [`LineClassifier`].
#[derive(Debug, Clone)]
pub struct SvnRepository<C> {
    client: C,
    classifier: LineClassifier,
    username: String,
}

impl<C: SvnClient> SvnRepository<C> {
    /// Create a repository wrapper committing as `username`.
    pub fn new(client: C, classifier: LineClassifier, username: impl Into<String>) -> Self {
        Self {
            client,
            classifier,
            username: username.into(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Inspect the working copy and list modified language files.
    ///
    /// # Errors
    ///
    /// Fails with [`SvnError::Status`] if any change other than a modified
    /// language file is present.
    pub fn status_summary(&self, wc: &WorkingCopy) -> Result<StatusSummary, SvnError> {
        let output = self.client.status(wc.path())?;
        Ok(self.classifier.parse_status(&output)?)
    }

    /// Whether the working copy has modified language files.
    pub fn status(&self, wc: &WorkingCopy) -> Result<bool, SvnError> {
        Ok(self.status_summary(wc)?.is_modified())
    }

    /// Bring the working copy up to date with the repository.
    ///
    /// Local modifications are reverted first; they are always re-created
    /// by the next download. Returns whether the update touched any
    /// language file.
    pub fn update(&self, wc: &WorkingCopy) -> Result<bool, SvnError> {
        let summary = self.status_summary(wc)?;
        if summary.is_modified() {
            tracing::info!(
                files = summary.modified.len(),
                working_copy = %wc,
                "reverting local modifications before update"
            );
            self.client.revert(wc.path())?;
        }

        let output = self.client.update(wc.path())?;
        let updated = self.classifier.updated_files(&output);
        tracing::debug!(files = ?updated, "update touched language files");
        Ok(!updated.is_empty())
    }

    /// Commit the working copy with the message stored in `message_file`.
    pub fn commit(&self, wc: &WorkingCopy, message_file: &Path) -> Result<(), SvnError> {
        self.client.commit(wc.path(), &self.username, message_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svn::mock::{MockSvn, SvnFailOn, SvnOperation};
    use tempfile::TempDir;

    fn setup() -> (TempDir, WorkingCopy, SvnRepository<MockSvn>) {
        let dir = TempDir::new().unwrap();
        let wc = WorkingCopy::new(dir.path()).unwrap();
        let repo = SvnRepository::new(
            MockSvn::new(),
            LineClassifier::new(".txt").unwrap(),
            "translators",
        );
        (dir, wc, repo)
    }

    #[test]
    fn clean_status_is_unmodified() {
        let (_dir, wc, repo) = setup();
        assert!(!repo.status(&wc).unwrap());
    }

    #[test]
    fn modified_status() {
        let (_dir, wc, repo) = setup();
        repo.client().modify(["german.txt", "unfinished/frisian.txt"]);
        assert!(repo.status(&wc).unwrap());
        assert_eq!(
            repo.status_summary(&wc).unwrap().modified,
            vec!["german.txt", "unfinished/frisian.txt"]
        );
    }

    #[test]
    fn foreign_status_line_fails() {
        let (_dir, wc, repo) = setup();
        repo.client().add_status_line("?       stray.txt");
        let err = repo.status(&wc).unwrap_err();
        assert!(err.to_string().contains("?       stray.txt"));
    }

    #[test]
    fn update_without_local_changes_does_not_revert() {
        let (_dir, wc, repo) = setup();
        repo.client().push_upstream(["german.txt"]);

        assert!(repo.update(&wc).unwrap());
        let ops = repo.client().operations();
        assert!(!ops.iter().any(|op| matches!(op, SvnOperation::Revert)));
    }

    #[test]
    fn update_reverts_local_changes_first() {
        let (_dir, wc, repo) = setup();
        repo.client().modify(["german.txt"]);

        assert!(!repo.update(&wc).unwrap());
        assert_eq!(
            repo.client().operations(),
            vec![
                SvnOperation::Status,
                SvnOperation::Revert,
                SvnOperation::Update
            ]
        );
        assert!(!repo.status(&wc).unwrap());
    }

    #[test]
    fn update_refuses_invalid_working_copy() {
        let (_dir, wc, repo) = setup();
        repo.client().add_status_line("A       new.txt");

        assert!(repo.update(&wc).is_err());
        assert!(!repo
            .client()
            .operations()
            .iter()
            .any(|op| matches!(op, SvnOperation::Revert | SvnOperation::Update)));
    }

    #[test]
    fn update_of_non_language_file_is_not_reported() {
        let (_dir, wc, repo) = setup();
        repo.client().push_upstream(["readme.md"]);
        assert!(!repo.update(&wc).unwrap());
    }

    #[test]
    fn commit_uses_configured_account() {
        let (dir, wc, repo) = setup();
        let msg = dir.path().join("msg");
        std::fs::write(&msg, "-Update\n").unwrap();

        repo.commit(&wc, &msg).unwrap();
        let ops = repo.client().operations();
        assert!(matches!(
            ops.last(),
            Some(SvnOperation::Commit { username, message }) if username == "translators" && message == "-Update\n"
        ));
    }

    #[test]
    fn commit_failure_propagates() {
        let (dir, wc, repo) = setup();
        repo.client().fail_on(SvnFailOn::Commit("out of date".into()));

        let err = repo.commit(&wc, &dir.path().join("msg")).unwrap_err();
        assert!(err.to_string().contains("out of date"));
    }
}
