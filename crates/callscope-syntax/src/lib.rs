//! Tree-sitter powered parsing for the callscope call-graph extractor.
//!
//! This crate owns the boundary between raw source text and concrete syntax
//! trees. It provides:
//!
//! - **Language detection** via [`SupportedLanguage`], which maps file
//!   extensions onto Tree-sitter grammars
//! - **Parsing** via [`Parser`], which wraps the Tree-sitter parser and
//!   returns a [`ParseResult`] owning both the tree and the source text
//! - **Syntax error reporting** via [`ParseResult::has_errors`] and
//!   [`ParseResult::first_error`], so callers can decide whether a tree is
//!   trustworthy enough to analyse
//!
//! # Supported Languages
//!
//! Currently supports:
//! - Python (`.py`)
//!
//! # Example
//!
//! ```
//! use callscope_syntax::{Parser, SupportedLanguage};
//!
//! let mut parser = Parser::new(SupportedLanguage::Python)?;
//! let result = parser.parse("def main():\n    run()\n")?;
//!
//! assert!(!result.has_errors());
//! assert_eq!(result.root_node().kind(), "module");
//! # Ok::<(), callscope_syntax::SyntaxError>(())
//! ```

mod error;
mod language;
mod parser;
mod position;

pub use error::SyntaxError;
pub use language::SupportedLanguage;
pub use parser::{ParseResult, Parser, SyntaxErrorInfo};
pub use position::{line_of, point_to_one_based};

#[cfg(test)]
mod tests;
