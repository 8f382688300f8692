//! CLI argument definitions for callscope.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Command-line interface for the callscope call graph extractor.
#[derive(Parser, Debug)]
#[command(
    name = "callscope",
    version,
    about = "Static call graph extraction for Python source trees",
    disable_help_subcommand = true,
    arg_required_else_help = true
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Structured subcommands for the callscope CLI.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Builds the call graph for a directory or a single file.
    Map(MapArgs),
}

/// Arguments for `callscope map`.
#[derive(Args, Debug, Clone)]
pub(crate) struct MapArgs {
    /// Directory or Python file to analyse.
    #[arg(value_name = "PATH")]
    pub(crate) path: Utf8PathBuf,
    /// Keeps only functions whose name, docstring, or path contains TEXT.
    #[arg(long, value_name = "TEXT")]
    pub(crate) focus: Option<String>,
    /// Also writes the graph payload as JSON to FILE.
    #[arg(long, value_name = "FILE")]
    pub(crate) json: Option<Utf8PathBuf>,
    /// Controls how the result is rendered on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
}
