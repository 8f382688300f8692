//! Call graph node representation.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Where something was found: a source file and a one-based line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    path: Utf8PathBuf,
    line: u32,
}

impl SourceLocation {
    /// Creates a new source location.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, line: u32) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    /// Returns the path of the source file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the one-based line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

/// Kind of callable represented by a call graph node.
///
/// A definition is a method only when its immediately enclosing scope is a
/// class; a function nested inside a method is a plain function again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallableKind {
    /// A synchronous function outside any class body.
    #[serde(rename = "function")]
    Function,
    /// An `async def` outside any class body.
    #[serde(rename = "async")]
    AsyncFunction,
    /// A synchronous function defined directly in a class body.
    #[serde(rename = "method")]
    Method,
    /// An `async def` defined directly in a class body.
    #[serde(rename = "async-method")]
    AsyncMethod,
}

impl CallableKind {
    /// Classifies a definition from its `async` marker and whether its
    /// enclosing scope is a class.
    #[must_use]
    pub const fn classify(is_async: bool, in_class: bool) -> Self {
        match (is_async, in_class) {
            (false, false) => Self::Function,
            (true, false) => Self::AsyncFunction,
            (false, true) => Self::Method,
            (true, true) => Self::AsyncMethod,
        }
    }

    /// Returns the label used in the graph payload.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::AsyncFunction => "async",
            Self::Method => "method",
            Self::AsyncMethod => "async-method",
        }
    }
}

impl fmt::Display for CallableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered function or method.
///
/// Nodes are created once, when the extractor enters the defining syntax
/// node, and are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableNode {
    /// Dot-joined module and nesting path; unique within one analysis run.
    qualified_name: String,
    /// Definition site (the `def` line, not a decorator line).
    location: SourceLocation,
    /// Function, method, or their async variants.
    kind: CallableKind,
    /// First line of the docstring, bounded in length; empty if absent.
    summary: String,
    /// Count of direct body statements that are not bare expressions or
    /// `pass`. A structural proxy only, not a complexity metric.
    size_hint: usize,
}

impl CallableNode {
    /// Creates a new callable node without documentation.
    #[must_use]
    pub fn new(
        qualified_name: impl Into<String>,
        kind: CallableKind,
        location: SourceLocation,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            location,
            kind,
            summary: String::new(),
            size_hint: 0,
        }
    }

    /// Attaches a documentation summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Attaches the statement-count size hint.
    #[must_use]
    pub const fn with_size_hint(mut self, size_hint: usize) -> Self {
        self.size_hint = size_hint;
        self
    }

    /// Returns the qualified name, which doubles as the node identifier.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Returns the definition site.
    #[must_use]
    pub const fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Returns the kind of callable.
    #[must_use]
    pub const fn kind(&self) -> CallableKind {
        self.kind
    }

    /// Returns the documentation summary, empty when undocumented.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the statement-count size hint.
    #[must_use]
    pub const fn size_hint(&self) -> usize {
        self.size_hint
    }

    /// Returns whether the node's name, summary, or file path contains
    /// `needle`, ignoring case. `needle` must already be lower-cased.
    #[must_use]
    pub fn matches_focus(&self, needle: &str) -> bool {
        self.qualified_name.to_lowercase().contains(needle)
            || self.summary.to_lowercase().contains(needle)
            || self.location.path().as_str().to_lowercase().contains(needle)
    }
}
