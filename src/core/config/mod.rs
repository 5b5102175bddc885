//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! langbridge reads one optional TOML file. Everything has a default, so a
//! missing file is not an error.
//!
//! # Config Locations
//!
//! Searched in order, first hit wins:
//! 1. `--config <path>` (must exist)
//! 2. `$LANGBRIDGE_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/langbridge/config.toml`
//! 4. `~/.langbridge/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use langbridge::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("service: {}", config.base_url());
//! println!("lock: {}", config.lock_file().display());
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default base URL of the translation service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:7080";

/// Default credentials file handed to the sync tool.
pub const DEFAULT_CREDENTIALS_FILE: &str = "user.cfg";

/// Default SVN account used for commits.
pub const DEFAULT_SVN_USERNAME: &str = "translators";

/// Default first line of the commit message.
pub const DEFAULT_COMMIT_BANNER: &str = "-Update from Eints:\n";

/// Default language file suffix.
pub const DEFAULT_LANG_FILE_EXT: &str = ".txt";

/// Default unstable translations subdirectory.
pub const DEFAULT_UNSTABLE_DIR: &str = "unfinished";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with defaults applied through accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents
    pub file: FileConfig,
    /// Path the file was loaded from (if any)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise the standard locations are
    /// searched and defaults are used when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(),
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        let file = Self::read(&path)?;
        file.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");

        Ok(Self {
            file,
            path: Some(path),
        })
    }

    /// Build a config from already-parsed contents.
    pub fn from_file_config(file: FileConfig) -> Result<Self, ConfigError> {
        file.validate()?;
        Ok(Self { file, path: None })
    }

    /// Find the first existing config file in the standard locations.
    fn discover() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("LANGBRIDGE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("langbridge/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".langbridge/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Read and parse a config file.
    fn read(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Path the configuration was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // =========================================================================
    // Accessors with defaults
    // =========================================================================

    pub fn base_url(&self) -> &str {
        self.file
            .service
            .as_ref()
            .and_then(|s| s.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn credentials_file(&self) -> PathBuf {
        PathBuf::from(
            self.file
                .service
                .as_ref()
                .and_then(|s| s.credentials_file.as_deref())
                .unwrap_or(DEFAULT_CREDENTIALS_FILE),
        )
    }

    pub fn svn_command(&self) -> &str {
        self.file
            .svn
            .as_ref()
            .and_then(|s| s.command.as_deref())
            .unwrap_or("svn")
    }

    pub fn svn_username(&self) -> &str {
        self.file
            .svn
            .as_ref()
            .and_then(|s| s.username.as_deref())
            .unwrap_or(DEFAULT_SVN_USERNAME)
    }

    pub fn lang_sync_command(&self) -> &str {
        self.file
            .lang_sync
            .as_ref()
            .and_then(|s| s.command.as_deref())
            .unwrap_or("lang_sync")
    }

    pub fn lang_file_ext(&self) -> &str {
        self.file
            .lang_sync
            .as_ref()
            .and_then(|s| s.lang_file_ext.as_deref())
            .unwrap_or(DEFAULT_LANG_FILE_EXT)
    }

    pub fn unstable_dir(&self) -> &str {
        self.file
            .lang_sync
            .as_ref()
            .and_then(|s| s.unstable_dir.as_deref())
            .unwrap_or(DEFAULT_UNSTABLE_DIR)
    }

    pub fn commit_banner(&self) -> &str {
        self.file
            .commit_banner
            .as_deref()
            .unwrap_or(DEFAULT_COMMIT_BANNER)
    }

    /// Lock file path; defaults to `langbridge.lock` in the temp directory.
    pub fn lock_file(&self) -> PathBuf {
        self.file
            .paths
            .as_ref()
            .and_then(|p| p.lock_file.as_deref())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("langbridge.lock"))
    }

    /// Commit message scratch file; defaults to `langbridge.msg` in the temp directory.
    pub fn message_file(&self) -> PathBuf {
        self.file
            .paths
            .as_ref()
            .and_then(|p| p.message_file.as_deref())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("langbridge.msg"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_file() {
        let config = Config::default();
        assert_eq!(config.base_url(), "http://localhost:7080");
        assert_eq!(config.credentials_file(), PathBuf::from("user.cfg"));
        assert_eq!(config.svn_command(), "svn");
        assert_eq!(config.svn_username(), "translators");
        assert_eq!(config.lang_sync_command(), "lang_sync");
        assert_eq!(config.lang_file_ext(), ".txt");
        assert_eq!(config.unstable_dir(), "unfinished");
        assert_eq!(config.commit_banner(), "-Update from Eints:\n");
        assert_eq!(
            config.lock_file(),
            std::env::temp_dir().join("langbridge.lock")
        );
        assert!(config.path().is_none());
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[svn]\nusername = \"bot\"\n\n[paths]\nlock_file = \"/run/lb.lock\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.svn_username(), "bot");
        assert_eq!(config.lock_file(), PathBuf::from("/run/lb.lock"));
        assert_eq!(config.svn_command(), "svn");
        assert_eq!(config.path(), Some(path.as_path()));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let result = Config::load(Some(&temp.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[svn\n").unwrap();

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn invalid_value_is_rejected_on_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[lang_sync]\nlang_file_ext = \"txt\"\n").unwrap();

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }
}
