//! Layered configuration for the callscope command-line tool.
//!
//! [`Config`] merges built-in defaults, a TOML configuration file, `CALLSCOPE_*`
//! environment variables and command-line flags, in increasing order of
//! precedence, via `ortho_config`. The configuration file is named with
//! `--config-path` (or `CALLSCOPE_CONFIG_PATH`) or discovered in the usual
//! locations.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{DEFAULT_LOG_FILTER, default_log_filter_string, default_log_format};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "CALLSCOPE")]
pub struct Config {
    /// `tracing` filter directives, in `EnvFilter` syntax.
    #[ortho_config(default = default_log_filter_string())]
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Output format for log events.
    #[ortho_config(default = default_log_format())]
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// Directory names to skip during discovery, on top of the built-in
    /// list.
    #[serde(default)]
    pub extra_skip_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            extra_skip_dirs: Vec::new(),
        }
    }
}

impl Config {
    /// Returns the log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the extra directory names to skip.
    #[must_use]
    pub fn extra_skip_dirs(&self) -> &[String] {
        &self.extra_skip_dirs
    }
}
