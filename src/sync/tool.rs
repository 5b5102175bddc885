//! sync::tool
//!
//! [`LangSync`] backed by the `lang_sync` command-line tool.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::traits::{LangSync, SyncError};
use crate::core::config::Config;
use crate::core::tool::Invocation;
use crate::core::types::{ProjectId, WorkingCopy};

/// Runs the external sync tool with a fixed set of connection settings.
#[derive(Debug, Clone)]
pub struct LangSyncTool {
    program: PathBuf,
    credentials_file: PathBuf,
    base_url: String,
    lang_file_ext: String,
    unstable_dir: String,
}

impl LangSyncTool {
    /// Build a tool runner from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            program: PathBuf::from(config.lang_sync_command()),
            credentials_file: config.credentials_file(),
            base_url: config.base_url().to_string(),
            lang_file_ext: config.lang_file_ext().to_string(),
            unstable_dir: config.unstable_dir().to_string(),
        }
    }

    /// Options shared by every sync tool call.
    fn common_args(&self, wc: &WorkingCopy, project: &ProjectId) -> Vec<OsString> {
        vec![
            "--user-password-file".into(),
            self.credentials_file.clone().into(),
            "--base-url".into(),
            self.base_url.clone().into(),
            "--lang-file-ext".into(),
            self.lang_file_ext.clone().into(),
            "--project".into(),
            project.as_str().into(),
            "--lang-dir".into(),
            wc.path().into(),
            "--unstable-lang-dir".into(),
            wc.unstable_dir(&self.unstable_dir).into(),
        ]
    }

    /// The command line run by [`LangSync::upload`].
    pub fn upload_invocation(&self, wc: &WorkingCopy, project: &ProjectId) -> Invocation {
        let mut args = self.common_args(wc, project);
        args.push("upload-base".into());
        args.push("upload-translations".into());
        Invocation::new(&self.program, args)
    }

    /// The command line run by [`LangSync::download`].
    pub fn download_invocation(
        &self,
        wc: &WorkingCopy,
        project: &ProjectId,
        credits_file: &Path,
    ) -> Invocation {
        let mut args = self.common_args(wc, project);
        args.push("--credits".into());
        args.push(credits_file.into());
        args.push("download-translations".into());
        Invocation::new(&self.program, args)
    }
}

impl LangSync for LangSyncTool {
    fn upload(&self, wc: &WorkingCopy, project: &ProjectId) -> Result<(), SyncError> {
        self.upload_invocation(wc, project).run()?;
        Ok(())
    }

    fn download(
        &self,
        wc: &WorkingCopy,
        project: &ProjectId,
        credits_file: &Path,
    ) -> Result<(), SyncError> {
        self.download_invocation(wc, project, credits_file).run()?;
        Ok(())
    }
}
