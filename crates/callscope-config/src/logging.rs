//! Format of the diagnostic events callscope writes to stderr.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How log events are rendered on stderr.
///
/// Parsed case-insensitively from `--log-format`, `CALLSCOPE_LOG_FORMAT` or
/// the `log_format` key of the configuration file.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One flattened JSON object per event, fields at the top level.
    Json,
    /// One terse line per event, such as a skipped file or the run summary.
    #[default]
    Compact,
}

/// Raised when a format name is neither `json` nor `compact`.
pub type LogFormatParseError = strum::ParseError;
