//! Whole-run aggregation: discover, parse, extract, merge, focus.

use camino::Utf8Path;
use tracing::{debug, info};

use callscope_syntax::{Parser, SupportedLanguage};

use crate::error::GraphError;
use crate::extract::extract;
use crate::graph::CombinedGraph;
use crate::source::SourceTree;

/// Options for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    focus: Option<String>,
    extra_skip_dirs: Vec<String>,
}

impl AnalysisOptions {
    /// Creates options with no focus filter and only the built-in skip list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the result to nodes matching `focus`.
    #[must_use]
    pub fn with_focus(mut self, focus: impl Into<String>) -> Self {
        self.focus = Some(focus.into());
        self
    }

    /// Adds directory names to skip on top of the built-in list.
    #[must_use]
    pub fn with_extra_skip_dirs(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.extra_skip_dirs.extend(names);
        self
    }

    /// Returns the focus filter, if any.
    #[must_use]
    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    /// Returns the extra directory names to skip.
    #[must_use]
    pub fn extra_skip_dirs(&self) -> &[String] {
        &self.extra_skip_dirs
    }
}

/// Builds the combined call graph for everything under `root`.
///
/// Files are processed one at a time in walk order. A file that cannot be
/// read or decoded, or whose syntax tree contains errors, contributes no
/// nodes or edges but still counts towards `files_scanned`. Later files
/// overwrite earlier nodes with the same qualified name.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved or walked, or the parser
/// cannot be initialised. Problems with individual files are never errors.
pub fn analyze(root: &Utf8Path, options: &AnalysisOptions) -> Result<CombinedGraph, GraphError> {
    let tree = SourceTree::discover(root, options.extra_skip_dirs())?;
    let mut parser = Parser::new(SupportedLanguage::Python)?;
    if tree.is_empty() {
        debug!(target: "callscope::aggregate", root = %tree.root(), "no python sources found");
    }
    let mut graph = CombinedGraph::new(tree.len());

    for unit in tree.units() {
        let parsed = match parser.parse(unit.text()) {
            Ok(parsed) => parsed,
            Err(error) => {
                debug!(target: "callscope::aggregate", path = %unit.path(), %error, "skipping file");
                continue;
            }
        };
        if parsed.has_errors() {
            let (line, column, missing) = parsed
                .first_error()
                .map(|info| (info.line, info.column, info.missing))
                .unwrap_or_default();
            debug!(
                target: "callscope::aggregate",
                path = %unit.path(),
                line,
                column,
                missing,
                "skipping file with syntax errors"
            );
            continue;
        }
        let (nodes, edges) = extract(&parsed, unit.module_name(), unit.path()).into_parts();
        graph.merge(nodes, edges);
    }

    let summary = graph.summary();
    info!(
        target: "callscope::aggregate",
        root = %tree.root(),
        files_scanned = summary.files_scanned,
        functions = summary.functions,
        calls = summary.calls,
        "analysis complete"
    );

    Ok(match options.focus() {
        Some(needle) => graph.focus(needle),
        None => graph,
    })
}
