//! Node tables and the combined call graph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::edge::CallEdge;
use crate::node::CallableNode;

/// Callable nodes keyed by qualified name.
///
/// Iteration follows first-insertion order. Inserting a node whose qualified
/// name is already present replaces the stored node in place, so the last
/// declaration wins while keeping the first declaration's position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTable {
    nodes: Vec<CallableNode>,
    index: HashMap<String, usize>,
}

impl NodeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, returning the node it replaced, if any.
    pub fn insert(&mut self, node: CallableNode) -> Option<CallableNode> {
        if let Some(&slot) = self.index.get(node.qualified_name()) {
            return self
                .nodes
                .get_mut(slot)
                .map(|existing| std::mem::replace(existing, node));
        }
        self.index
            .insert(node.qualified_name().to_owned(), self.nodes.len());
        self.nodes.push(node);
        None
    }

    /// Returns the node with the given qualified name.
    #[must_use]
    pub fn get(&self, qualified_name: &str) -> Option<&CallableNode> {
        self.index
            .get(qualified_name)
            .and_then(|&slot| self.nodes.get(slot))
    }

    /// Returns whether a node with the given qualified name is present.
    #[must_use]
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.index.contains_key(qualified_name)
    }

    /// Returns an iterator over the nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CallableNode> {
        self.nodes.iter()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Keeps only the nodes matching `predicate`, preserving order.
    pub fn retain(&mut self, mut predicate: impl FnMut(&CallableNode) -> bool) {
        self.nodes.retain(|node| predicate(node));
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (node.qualified_name().to_owned(), slot))
            .collect();
    }
}

impl IntoIterator for NodeTable {
    type Item = CallableNode;
    type IntoIter = std::vec::IntoIter<CallableNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

/// Summary counts for an analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    /// Source units found, whether or not they could be read or parsed.
    pub files_scanned: usize,
    /// Number of nodes in the graph.
    pub functions: usize,
    /// Number of edges in the graph.
    pub calls: usize,
}

/// The merged graph for a whole analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedGraph {
    nodes: NodeTable,
    edges: Vec<CallEdge>,
    files_scanned: usize,
}

impl CombinedGraph {
    /// Creates an empty graph that records `files_scanned` source units.
    #[must_use]
    pub fn new(files_scanned: usize) -> Self {
        Self {
            files_scanned,
            ..Self::default()
        }
    }

    /// Merges one file's nodes and edges into the graph.
    ///
    /// Nodes replace same-named nodes already present. Edges are appended
    /// in order without deduplication.
    pub fn merge(&mut self, nodes: NodeTable, edges: Vec<CallEdge>) {
        for node in nodes {
            self.nodes.insert(node);
        }
        self.edges.extend(edges);
    }

    /// Returns the node with the given qualified name.
    #[must_use]
    pub fn node(&self, qualified_name: &str) -> Option<&CallableNode> {
        self.nodes.get(qualified_name)
    }

    /// Returns the node table.
    #[must_use]
    pub const fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    /// Returns the edges in discovery order.
    #[must_use]
    pub fn edges(&self) -> &[CallEdge] {
        &self.edges
    }

    /// Returns the number of source units found.
    #[must_use]
    pub const fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    /// Returns the run summary. Node and edge counts are always derived
    /// from the graph itself.
    #[must_use]
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            files_scanned: self.files_scanned,
            functions: self.nodes.len(),
            calls: self.edges.len(),
        }
    }

    /// Keeps only nodes whose qualified name, summary, or file path contains
    /// `needle` (case-insensitive), then only edges whose caller survived.
    ///
    /// Callees are never checked, so an edge to a filtered-out or unknown
    /// callee stays as long as its caller does. An empty needle leaves the
    /// graph untouched.
    #[must_use]
    pub fn focus(mut self, needle: &str) -> Self {
        if needle.is_empty() {
            return self;
        }
        let lowered = needle.to_lowercase();
        self.nodes.retain(|node| node.matches_focus(&lowered));
        let nodes = &self.nodes;
        self.edges.retain(|edge| nodes.contains(edge.caller()));
        self
    }
}
