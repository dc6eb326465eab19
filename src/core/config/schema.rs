//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: the prompt must fit on one
//! line and the input limit must be positive.

use serde::Deserialize;

use super::ConfigError;

/// Default prompt shown by the console.
pub const DEFAULT_PROMPT: &str = "> ";

/// Top-level configuration file.
///
/// # Example
///
/// ```toml
/// [console]
/// prompt = "cmd> "
/// show_suggestions = true
///
/// [limits]
/// max_input_length = 256
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Console behavior
    pub console: Option<ConsoleConfig>,

    /// Input limits applied by the registry
    pub limits: Option<LimitsConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(console) = &self.console {
            console.validate()?;
        }
        if let Some(limits) = &self.limits {
            limits.validate()?;
        }
        Ok(())
    }
}

/// The `[console]` table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Prompt printed before each line in the REPL
    pub prompt: Option<String>,

    /// Print suggestions after a line that does not parse
    pub show_suggestions: Option<bool>,
}

impl ConsoleConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the prompt spans lines.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prompt) = &self.prompt {
            if prompt.contains(['\n', '\r']) {
                return Err(ConfigError::InvalidValue(format!(
                    "console.prompt must be a single line, got {prompt:?}"
                )));
            }
        }
        Ok(())
    }
}

/// The `[limits]` table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Longest accepted input, in characters
    pub max_input_length: Option<usize>,
}

impl LimitsConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_length == Some(0) {
            return Err(ConfigError::InvalidValue(
                "limits.max_input_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
