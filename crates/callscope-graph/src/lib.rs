//! Static call graph extraction for Python source trees.
//!
//! This crate reconstructs which functions exist, where they are defined,
//! and which functions call which others, from syntax alone. Nothing is
//! executed and nothing is type checked: callee names are best-effort
//! textual tokens such as `helper` or `self.engine.ignite`, and they are
//! never linked to a defining symbol.
//!
//! # Pipeline
//!
//! 1. [`SourceTree`] discovers `.py` files under a root, pruning tool
//!    directories, and derives a dotted module name for each.
//! 2. [`extract`] walks one parsed file with a [`ScopeTracker`], registering
//!    [`CallableNode`]s under qualified names and recording a [`CallEdge`]
//!    for every call inside a function body.
//! 3. [`analyze`] runs the first two steps over a whole root and merges the
//!    results into a [`CombinedGraph`], optionally narrowed with
//!    [`CombinedGraph::focus`].
//! 4. [`GraphPayload`] is the stable, serialisable shape consumed by
//!    reporting tools.
//!
//! # Example
//!
//! ```ignore
//! use callscope_graph::{AnalysisOptions, GraphPayload, analyze};
//!
//! let graph = analyze("src".into(), &AnalysisOptions::new().with_focus("ignite"))?;
//! let payload = GraphPayload::from(&graph);
//! println!("{}", serde_json::to_string_pretty(&payload)?);
//! ```

mod aggregate;
mod edge;
mod error;
mod extract;
mod graph;
mod node;
mod payload;
mod scope;
mod source;

pub use aggregate::{AnalysisOptions, analyze};
pub use edge::CallEdge;
pub use error::GraphError;
pub use extract::{Extraction, SUMMARY_LIMIT, doc_summary, extract, resolve_callee, size_hint};
pub use graph::{CombinedGraph, GraphSummary, NodeTable};
pub use node::{CallableKind, CallableNode, SourceLocation};
pub use payload::{EdgePayload, GraphPayload, NodePayload};
pub use scope::{ScopeKind, ScopeTracker};
pub use source::{DEFAULT_SKIP_DIRS, SourceTree, SourceUnit, module_name, read_source};

#[cfg(test)]
mod tests;
