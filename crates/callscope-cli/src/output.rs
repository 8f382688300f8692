//! Output selection and human-readable rendering for analysis results.

use clap::ValueEnum;

use callscope_graph::GraphSummary;

const LABEL_WIDTH: usize = 13;
const MIN_VALUE_WIDTH: usize = 5;

/// Output format selection for the analysis result.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render the summary table.
    Human,
    /// Always emit the graph payload as JSON.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Summary table.
    Human,
    /// Pretty-printed graph payload.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto => {
                if stdout_is_terminal {
                    ResolvedOutputFormat::Human
                } else {
                    ResolvedOutputFormat::Json
                }
            }
            Self::Human => ResolvedOutputFormat::Human,
            Self::Json => ResolvedOutputFormat::Json,
        }
    }
}

/// Renders the run counts as a two-column table.
///
/// Every line, including the last, ends with a newline.
#[must_use]
pub fn render_summary(summary: &GraphSummary) -> String {
    let rows = [
        ("Files Scanned", summary.files_scanned),
        ("Functions", summary.functions),
        ("Calls", summary.calls),
    ];
    let value_width = rows
        .iter()
        .map(|(_, value)| value.to_string().len())
        .fold(MIN_VALUE_WIDTH, usize::max);

    let mut rendered = format!("{:<LABEL_WIDTH$}  {:>value_width$}\n", "Metric", "Value");
    for (label, value) in rows {
        rendered.push_str(&format!("{label:<LABEL_WIDTH$}  {value:>value_width$}\n"));
    }
    rendered
}
