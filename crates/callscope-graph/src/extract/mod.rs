//! Scope-aware call graph extraction for one parsed file.
//!
//! The extractor makes a single depth-first pass over the syntax tree,
//! driven by an explicit work stack rather than recursion. It
//! registers every function and method it meets as a [`CallableNode`] and
//! turns every call expression inside a function body into a [`CallEdge`]
//! from the innermost enclosing function to the resolved callee name.
//!
//! Classes open a scope but are not callables. Calls made directly in a
//! class body, or at module level, have no caller and are dropped.

mod resolve;
mod summary;

use camino::Utf8Path;
use tracing::debug;
use tree_sitter::Node;

use callscope_syntax::{ParseResult, line_of};

use crate::edge::CallEdge;
use crate::graph::NodeTable;
use crate::node::{CallableKind, CallableNode, SourceLocation};
use crate::scope::{ScopeKind, ScopeTracker};

pub use resolve::resolve_callee;
pub use summary::{SUMMARY_LIMIT, doc_summary, size_hint};

/// Nodes and edges extracted from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    nodes: NodeTable,
    edges: Vec<CallEdge>,
}

impl Extraction {
    /// Returns the extracted nodes.
    #[must_use]
    pub const fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    /// Returns the extracted edges in discovery order.
    #[must_use]
    pub fn edges(&self) -> &[CallEdge] {
        &self.edges
    }

    /// Splits the extraction into its nodes and edges.
    #[must_use]
    pub fn into_parts(self) -> (NodeTable, Vec<CallEdge>) {
        (self.nodes, self.edges)
    }
}

/// Extracts callables and calls from a parsed file.
///
/// `module_name` prefixes every qualified name; `path` is recorded on every
/// node and edge.
#[must_use]
pub fn extract(parsed: &ParseResult, module_name: &str, path: &Utf8Path) -> Extraction {
    let mut extractor = Extractor {
        parsed,
        path,
        scopes: ScopeTracker::new(module_name),
        extraction: Extraction::default(),
        pending: Vec::new(),
    };
    extractor.run(parsed.root_node());

    debug!(
        target: "callscope::extract",
        module = module_name,
        path = %path,
        functions = extractor.extraction.nodes.len(),
        calls = extractor.extraction.edges.len(),
        "extracted file"
    );
    extractor.extraction
}

/// The syntax node kinds the extractor treats specially.
enum Visit<'tree> {
    Function {
        definition: Node<'tree>,
        decorators: Vec<Node<'tree>>,
    },
    Class {
        definition: Node<'tree>,
        decorators: Vec<Node<'tree>>,
    },
    Call(Node<'tree>),
    Other(Node<'tree>),
}

impl<'tree> Visit<'tree> {
    fn classify(node: Node<'tree>) -> Self {
        match node.kind() {
            "function_definition" => Self::Function {
                definition: node,
                decorators: Vec::new(),
            },
            "class_definition" => Self::Class {
                definition: node,
                decorators: Vec::new(),
            },
            "decorated_definition" => Self::classify_decorated(node),
            "call" => Self::Call(node),
            _ => Self::Other(node),
        }
    }

    fn classify_decorated(node: Node<'tree>) -> Self {
        let Some(definition) = node.child_by_field_name("definition") else {
            return Self::Other(node);
        };
        let mut cursor = node.walk();
        let decorators = node
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "decorator")
            .collect();
        match definition.kind() {
            "function_definition" => Self::Function {
                definition,
                decorators,
            },
            "class_definition" => Self::Class {
                definition,
                decorators,
            },
            _ => Self::Other(node),
        }
    }
}

/// Pending traversal work. Children are pushed in reverse so they pop in
/// source order.
enum Task<'tree> {
    Visit(Node<'tree>),
    Leave,
}

struct Extractor<'a> {
    parsed: &'a ParseResult,
    path: &'a Utf8Path,
    scopes: ScopeTracker,
    extraction: Extraction,
    pending: Vec<Task<'a>>,
}

impl<'a> Extractor<'a> {
    fn run(&mut self, root: Node<'a>) {
        self.pending.push(Task::Visit(root));
        while let Some(task) = self.pending.pop() {
            match task {
                Task::Visit(node) => self.visit(node),
                Task::Leave => self.scopes.leave(),
            }
        }
    }

    fn visit(&mut self, node: Node<'a>) {
        match Visit::classify(node) {
            Visit::Function {
                definition,
                decorators,
            } => self.visit_function(definition, &decorators),
            Visit::Class {
                definition,
                decorators,
            } => self.visit_class(definition, &decorators),
            Visit::Call(call) => self.visit_call(call),
            Visit::Other(other) => self.schedule_children(other, None),
        }
    }

    /// Queues the named children of `node`, leaving out `skipped`.
    fn schedule_children(&mut self, node: Node<'a>, skipped: Option<Node<'a>>) {
        let mut cursor = node.walk();
        let children: Vec<Node<'a>> = node
            .named_children(&mut cursor)
            .filter(|child| skipped.is_none_or(|skip| skip.id() != child.id()))
            .collect();
        self.pending
            .extend(children.into_iter().rev().map(Task::Visit));
    }

    /// Queues the inside of an opened scope: the definition's children, then
    /// its decorators, then its return annotation, then the scope exit.
    fn schedule_scoped(&mut self, definition: Node<'a>, decorators: &[Node<'a>]) {
        let returns = definition.child_by_field_name("return_type");
        self.pending.push(Task::Leave);
        self.pending.extend(returns.map(Task::Visit));
        self.pending
            .extend(decorators.iter().rev().copied().map(Task::Visit));
        self.schedule_children(definition, returns);
    }

    fn visit_function(&mut self, definition: Node<'a>, decorators: &[Node<'a>]) {
        let Some(name) = self.definition_name(definition) else {
            self.schedule_children(definition, None);
            return;
        };

        let kind = CallableKind::classify(is_async(definition), self.scopes.in_class_body());
        let body = definition.child_by_field_name("body");
        let summary = body
            .map(|body| doc_summary(self.parsed, body))
            .unwrap_or_default();
        let size = body.map(size_hint).unwrap_or_default();

        let qualified_name = self.scopes.enter(name, ScopeKind::Function);
        let location = SourceLocation::new(self.path, line_of(definition));
        let node = CallableNode::new(qualified_name, kind, location)
            .with_summary(summary)
            .with_size_hint(size);
        self.extraction.nodes.insert(node);

        self.schedule_scoped(definition, decorators);
    }

    fn visit_class(&mut self, definition: Node<'a>, decorators: &[Node<'a>]) {
        let Some(name) = self.definition_name(definition) else {
            self.schedule_children(definition, None);
            return;
        };
        self.scopes.enter(name, ScopeKind::Class);
        self.schedule_scoped(definition, decorators);
    }

    fn visit_call(&mut self, call: Node<'a>) {
        if let Some(caller) = self.scopes.current_caller() {
            let callee = call
                .child_by_field_name("function")
                .and_then(|target| resolve_callee(self.parsed, target));
            if let Some(callee) = callee {
                let location = SourceLocation::new(self.path, line_of(call));
                let edge = CallEdge::new(caller, callee, location);
                self.extraction.edges.push(edge);
            }
        }
        self.schedule_children(call, None);
    }

    fn definition_name(&self, definition: Node<'a>) -> Option<&'a str> {
        definition
            .child_by_field_name("name")
            .map(|name| self.parsed.node_text(name))
            .filter(|name| !name.is_empty())
    }
}

fn is_async(definition: Node<'_>) -> bool {
    let mut cursor = definition.walk();
    let found = definition
        .children(&mut cursor)
        .any(|child| child.kind() == "async");
    found
}
