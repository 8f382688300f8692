//! The serialisable graph payload handed to reporting tools.
//!
//! Key names are part of the contract with downstream consumers and must
//! not change.

use serde::{Deserialize, Serialize};

use crate::edge::CallEdge;
use crate::graph::{CombinedGraph, GraphSummary};
use crate::node::{CallableKind, CallableNode};

/// A node as it appears in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePayload {
    /// Qualified name.
    pub id: String,
    /// Path of the defining file.
    pub path: String,
    /// One-based definition line.
    pub lineno: u32,
    /// Callable kind.
    #[serde(rename = "type")]
    pub kind: CallableKind,
    /// Documentation summary, possibly empty.
    pub doc: String,
    /// Statement-count size hint.
    pub complexity_hint: usize,
}

impl From<&CallableNode> for NodePayload {
    fn from(node: &CallableNode) -> Self {
        Self {
            id: node.qualified_name().to_owned(),
            path: node.location().path().to_string(),
            lineno: node.location().line(),
            kind: node.kind(),
            doc: node.summary().to_owned(),
            complexity_hint: node.size_hint(),
        }
    }
}

/// An edge as it appears in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgePayload {
    /// Caller's qualified name.
    pub source: String,
    /// Resolved callee name.
    pub target: String,
    /// Path of the file containing the call.
    pub path: String,
    /// One-based line of the call.
    pub lineno: u32,
}

impl From<&CallEdge> for EdgePayload {
    fn from(edge: &CallEdge) -> Self {
        Self {
            source: edge.caller().to_owned(),
            target: edge.callee().to_owned(),
            path: edge.location().path().to_string(),
            lineno: edge.location().line(),
        }
    }
}

/// The complete payload: nodes, edges and run summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPayload {
    /// Nodes in graph order.
    pub nodes: Vec<NodePayload>,
    /// Edges in discovery order.
    pub edges: Vec<EdgePayload>,
    /// Run summary.
    pub summary: GraphSummary,
}

impl From<&CombinedGraph> for GraphPayload {
    fn from(graph: &CombinedGraph) -> Self {
        Self {
            nodes: graph.nodes().iter().map(NodePayload::from).collect(),
            edges: graph.edges().iter().map(EdgePayload::from).collect(),
            summary: graph.summary(),
        }
    }
}
