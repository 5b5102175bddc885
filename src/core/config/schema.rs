//! core::config::schema
//!
//! Configuration schema types.
//!
//! Every field is optional; accessors on [`super::Config`] apply the
//! defaults. Values are validated after parsing so that a bad config
//! fails before any lock is taken or any command is run.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// On-disk configuration file.
///
/// # Example
///
/// ```toml
/// commit_banner = "-Update from Eints:\n"
///
/// [service]
/// base_url = "https://translator.example.org"
/// credentials_file = "/etc/langbridge/user.cfg"
///
/// [svn]
/// command = "svn"
/// username = "translators"
///
/// [lang_sync]
/// command = "lang_sync"
/// lang_file_ext = ".txt"
/// unstable_dir = "unfinished"
///
/// [paths]
/// lock_file = "/tmp/langbridge.lock"
/// message_file = "/tmp/langbridge.msg"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// First line of every commit message
    pub commit_banner: Option<String>,

    /// Translation service connection
    pub service: Option<ServiceConfig>,

    /// SVN client settings
    pub svn: Option<SvnConfig>,

    /// Sync tool settings
    pub lang_sync: Option<LangSyncConfig>,

    /// Scratch file locations
    pub paths: Option<PathsConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(banner) = &self.commit_banner {
            if banner.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "commit_banner cannot be empty".into(),
                ));
            }
            if !banner.ends_with('\n') {
                return Err(ConfigError::InvalidValue(
                    "commit_banner must end with a newline".into(),
                ));
            }
        }
        if let Some(service) = &self.service {
            service.validate()?;
        }
        if let Some(svn) = &self.svn {
            non_empty("svn.command", svn.command.as_deref())?;
            non_empty("svn.username", svn.username.as_deref())?;
        }
        if let Some(sync) = &self.lang_sync {
            sync.validate()?;
        }
        Ok(())
    }
}

/// Translation service connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Base URL of the service
    pub base_url: Option<String>,

    /// File holding the service user name and password
    pub credentials_file: Option<String>,
}

impl ServiceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue(format!(
                    "service.base_url '{}' must start with http:// or https://",
                    url
                )));
            }
        }
        non_empty("service.credentials_file", self.credentials_file.as_deref())
    }
}

/// SVN client settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SvnConfig {
    /// Executable to run
    pub command: Option<String>,

    /// Account used for commits
    pub username: Option<String>,
}

/// Sync tool settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LangSyncConfig {
    /// Executable to run
    pub command: Option<String>,

    /// Suffix of language files
    pub lang_file_ext: Option<String>,

    /// Subdirectory of the working copy with unstable translations
    pub unstable_dir: Option<String>,
}

impl LangSyncConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_empty("lang_sync.command", self.command.as_deref())?;
        if let Some(ext) = &self.lang_file_ext {
            if ext.len() < 2 || !ext.starts_with('.') || ext[1..].contains(['.', '/', '\\']) {
                return Err(ConfigError::InvalidValue(format!(
                    "lang_sync.lang_file_ext '{}' must look like '.txt'",
                    ext
                )));
            }
        }
        if let Some(dir) = &self.unstable_dir {
            if dir.is_empty() || dir.contains(['/', '\\']) || dir == "." || dir == ".." {
                return Err(ConfigError::InvalidValue(format!(
                    "lang_sync.unstable_dir '{}' must be a plain directory name",
                    dir
                )));
            }
        }
        Ok(())
    }
}

/// Scratch file locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Process lock file
    pub lock_file: Option<String>,

    /// Commit message scratch file
    pub message_file: Option<String>,
}

fn non_empty(key: &str, value: Option<&str>) -> Result<(), ConfigError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ConfigError::InvalidValue(format!(
            "{} cannot be empty",
            key
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_valid() {
        FileConfig::default().validate().unwrap();
    }

    #[test]
    fn parses_all_sections() {
        let toml = r#"
            commit_banner = "-Update from Eints:\n"

            [service]
            base_url = "https://translator.example.org"
            credentials_file = "user.cfg"

            [svn]
            command = "/usr/bin/svn"
            username = "translators"

            [lang_sync]
            command = "lang_sync"
            lang_file_ext = ".txt"
            unstable_dir = "unfinished"

            [paths]
            lock_file = "/run/langbridge.lock"
            message_file = "/run/langbridge.msg"
        "#;

        let config: FileConfig = toml::from_str(toml).unwrap();
        config.validate().unwrap();
        assert_eq!(
            config.svn.as_ref().and_then(|s| s.command.as_deref()),
            Some("/usr/bin/svn")
        );
        assert_eq!(
            config.paths.as_ref().and_then(|p| p.lock_file.as_deref()),
            Some("/run/langbridge.lock")
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        let result: Result<FileConfig, _> = toml::from_str("retries = 3\n");
        assert!(result.is_err());

        let result: Result<FileConfig, _> = toml::from_str("[svn]\npassword = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_bad_base_url() {
        let config: FileConfig =
            toml::from_str("[service]\nbase_url = \"localhost:7080\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn rejects_bad_extension() {
        for ext in ["txt", ".", ".a.b", "./x"] {
            let config = FileConfig {
                lang_sync: Some(LangSyncConfig {
                    lang_file_ext: Some(ext.into()),
                    ..Default::default()
                }),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "expected '{}' to be rejected", ext);
        }
    }

    #[test]
    fn rejects_nested_unstable_dir() {
        let config = FileConfig {
            lang_sync: Some(LangSyncConfig {
                unstable_dir: Some("a/b".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn banner_must_end_with_newline() {
        let config = FileConfig {
            commit_banner: Some("-Update".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_blank_commands() {
        let config = FileConfig {
            svn: Some(SvnConfig {
                command: Some("  ".into()),
                username: None,
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
