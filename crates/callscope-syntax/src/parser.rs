//! Reusable tree-sitter parser and the trees it produces.

use tree_sitter::Node;

use crate::error::SyntaxError;
use crate::language::SupportedLanguage;
use crate::position::point_to_one_based;

/// A syntax tree together with the text it was parsed from.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
    language: SupportedLanguage,
}

impl ParseResult {
    /// Language of the parsed text.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// The `module` node at the top of the tree.
    #[must_use]
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`, or an empty string when its byte range
    /// does not land on character boundaries.
    #[must_use]
    pub fn node_text(&self, node: Node<'_>) -> &str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    /// Whether tree-sitter had to insert `ERROR` or `MISSING` nodes.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.root_node().has_error()
    }

    /// Location of the earliest `ERROR` or `MISSING` node in document order.
    #[must_use]
    pub fn first_error(&self) -> Option<SyntaxErrorInfo> {
        first_error_node(self.root_node()).map(SyntaxErrorInfo::from_node)
    }
}

/// Where a syntax error starts, in one-based coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// One-based line.
    pub line: u32,
    /// One-based column, in bytes.
    pub column: u32,
    /// `true` when tree-sitter invented a token rather than skipping text.
    pub missing: bool,
}

impl SyntaxErrorInfo {
    fn from_node(node: Node<'_>) -> Self {
        let (line, column) = point_to_one_based(node.start_position());
        Self {
            line,
            column,
            missing: node.is_missing(),
        }
    }
}

/// Tree-sitter parser bound to one language.
///
/// One instance can parse any number of sources in turn.
pub struct Parser {
    inner: tree_sitter::Parser,
    language: SupportedLanguage,
}

impl Parser {
    /// Creates a parser for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::GrammarUnavailable`] when tree-sitter rejects
    /// the grammar.
    pub fn new(language: SupportedLanguage) -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&language.grammar())
            .map_err(|error| SyntaxError::GrammarUnavailable {
                language,
                message: error.to_string(),
            })?;
        Ok(Self { inner, language })
    }

    /// Parses `source`. Malformed input still yields a tree.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::NoTree`] if tree-sitter gives up without a
    /// tree.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self.inner.parse(source, None).ok_or(SyntaxError::NoTree {
            language: self.language,
        })?;
        Ok(ParseResult {
            tree,
            source: source.to_owned(),
            language: self.language,
        })
    }
}

fn first_error_node(root: Node<'_>) -> Option<Node<'_>> {
    let mut current = root;
    loop {
        if current.is_error() || current.is_missing() {
            return Some(current);
        }
        if !current.has_error() {
            return None;
        }
        let mut cursor = current.walk();
        let next = current
            .children(&mut cursor)
            .find(|child| child.is_error() || child.is_missing() || child.has_error());
        current = next?;
    }
}
