//! Shared configuration for the pipwright helper binary.
//!
//! The helper exposes exactly two settings: the tracing filter expression and
//! the log output format. Values are resolved with command-line flags taking
//! precedence over environment variables, which in turn take precedence over
//! built-in defaults. Environment lookup is injected through
//! [`Config::load_with_env`] so tests never have to mutate the process
//! environment.

mod defaults;
mod logging;

use std::env;

use thiserror::Error;

pub use defaults::{DEFAULT_LOG_FILTER, default_log_filter, default_log_format};
pub use logging::{LogFormat, LogFormatParseError};

/// Environment variable overriding the tracing filter expression.
pub const ENV_LOG_FILTER: &str = "PIPWRIGHT_LOG_FILTER";

/// Environment variable overriding the log output format.
pub const ENV_LOG_FORMAT: &str = "PIPWRIGHT_LOG_FORMAT";

/// Resolved configuration shared by the binary and its tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    log_filter: String,
    log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: defaults::default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

/// Command-line overrides applied on top of the environment.
///
/// The binary parses its flags with clap and hands the optional values here;
/// the configuration crate owns the precedence rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Value of `--log-filter`, when supplied.
    pub log_filter: Option<String>,
    /// Value of `--log-format`, when supplied.
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Loads configuration from the process environment with no overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogFormat`] when the format environment
    /// variable holds an unrecognised value.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_overrides(&Overrides::default())
    }

    /// Loads configuration from the process environment and applies overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogFormat`] when the format environment
    /// variable holds an unrecognised value.
    pub fn load_with_overrides(overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::load_with_env(overrides, |name| env::var(name).ok())
    }

    /// Loads configuration using the supplied environment lookup.
    ///
    /// Flag values in `overrides` win over environment values, which win over
    /// defaults. An empty environment value is treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogFormat`] when the environment supplies
    /// a format value that does not name a known [`LogFormat`].
    pub fn load_with_env<F>(overrides: &Overrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_value = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let log_filter = overrides
            .log_filter
            .clone()
            .or_else(|| env_value(ENV_LOG_FILTER))
            .unwrap_or_else(defaults::default_log_filter_string);

        let log_format = match overrides.log_format {
            Some(format) => format,
            None => match env_value(ENV_LOG_FORMAT) {
                Some(raw) => raw
                    .trim()
                    .parse::<LogFormat>()
                    .map_err(|_| ConfigError::InvalidLogFormat { value: raw })?,
                None => default_log_format(),
            },
        };

        Ok(Self {
            log_filter,
            log_format,
        })
    }

    /// The tracing filter expression.
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// The log output format.
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The log format value does not name a known format.
    #[error("invalid log format '{value}' (expected 'compact' or 'json')")]
    InvalidLogFormat {
        /// The rejected value.
        value: String,
    },
}
