//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! An explicit path (`--config`) is used as-is and must exist. Otherwise the
//! first existing file is used, searched in order:
//! 1. `$CMDTREE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/cmdtree/config.toml`
//! 3. `~/.cmdtree/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use cmdtree::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("Prompt: {:?}", config.prompt());
//! let options = config.registry_options();
//! ```

pub mod schema;

pub use schema::{ConsoleConfig, FileConfig, LimitsConfig, DEFAULT_PROMPT};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::engine::RegistryOptions;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "CMDTREE_CONFIG";

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

    #[error("config file '{0}' does not exist")]
    NotFound(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with accessors that apply defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents
    pub file: FileConfig,
    /// Path the file was loaded from, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `explicit` or the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit path is missing, or if a config file
    /// exists but cannot be read, parsed, or validated. Finding no file in the
    /// default locations is not an error (defaults are used).
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], reading environment variables through `var`.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_with<F>(explicit: Option<&Path>, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = match explicit {
            Some(path) if path.exists() => Some(path.to_path_buf()),
            Some(path) => return Err(ConfigError::NotFound(path.to_path_buf())),
            None => Self::search_paths(var).into_iter().find(|p| p.exists()),
        };

        let Some(path) = path else {
            debug!("no config file found, using defaults");
            return Ok(Self::default());
        };

        debug!(path = %path.display(), "loading config");
        let file = Self::read_config(&path)?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path),
        })
    }

    /// Candidate locations in search order.
    pub fn search_paths<F>(var: F) -> Vec<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut paths = Vec::new();

        // 1. $CMDTREE_CONFIG
        if let Some(path) = var(CONFIG_ENV) {
            paths.push(PathBuf::from(path));
        }

        // 2. $XDG_CONFIG_HOME/cmdtree/config.toml
        if let Some(xdg_home) = var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg_home).join("cmdtree/config.toml"));
        }

        // 3. ~/.cmdtree/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cmdtree/config.toml"));
        }

        paths
    }

    /// Parse a config file from a string. `path` is used in error messages.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` on malformed TOML or unknown keys.
    pub fn parse(contents: &str, path: &Path) -> Result<FileConfig, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents, path)
    }

    /// Path the configuration was loaded from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// REPL prompt.
    ///
    /// Default: `"> "`
    pub fn prompt(&self) -> &str {
        self.file
            .console
            .as_ref()
            .and_then(|c| c.prompt.as_deref())
            .unwrap_or(DEFAULT_PROMPT)
    }

    /// Whether the console prints suggestions after a rejected line.
    ///
    /// Default: true
    pub fn show_suggestions(&self) -> bool {
        self.file
            .console
            .as_ref()
            .and_then(|c| c.show_suggestions)
            .unwrap_or(true)
    }

    /// Longest accepted input, if limited.
    pub fn max_input_length(&self) -> Option<usize> {
        self.file.limits.as_ref().and_then(|l| l.max_input_length)
    }

    /// Registry tunables derived from this configuration.
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            max_input_length: self.max_input_length(),
        }
    }
}
