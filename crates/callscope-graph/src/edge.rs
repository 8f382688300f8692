//! Call graph edge representation.

use crate::node::SourceLocation;

/// An edge in the call graph: one call expression observed in a function
/// body.
///
/// Edges are directed from caller to callee. The caller is always the
/// qualified name of a discovered callable; the callee is the best-effort
/// textual name of the call target and may name nothing in the graph (a
/// library function, a method on an unknown object). Identical edges are
/// kept: the edge list is a multiset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEdge {
    /// Qualified name of the innermost enclosing callable.
    caller: String,
    /// Resolved target name, bare (`helper`) or dotted (`self.engine.ignite`).
    callee: String,
    /// Position of the call expression.
    location: SourceLocation,
}

impl CallEdge {
    /// Creates a new call edge.
    #[must_use]
    pub fn new(
        from_caller: impl Into<String>,
        to_callee: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            caller: from_caller.into(),
            callee: to_callee.into(),
            location,
        }
    }

    /// Returns the caller's qualified name.
    #[must_use]
    pub fn caller(&self) -> &str {
        &self.caller
    }

    /// Returns the callee's resolved name.
    #[must_use]
    pub fn callee(&self) -> &str {
        &self.callee
    }

    /// Returns the call site.
    #[must_use]
    pub const fn location(&self) -> &SourceLocation {
        &self.location
    }
}
