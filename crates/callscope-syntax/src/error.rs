//! Errors raised while turning source text into a tree.

use thiserror::Error;

use crate::language::SupportedLanguage;

/// Failure to obtain a syntax tree.
///
/// Malformed source is not an error here: tree-sitter still returns a tree
/// and [`crate::ParseResult::has_errors`] reports the damage.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// The grammar could not be loaded into the parser, typically because of
    /// an ABI version mismatch.
    #[error("cannot load the {language} grammar: {message}")]
    GrammarUnavailable {
        /// Language whose grammar was rejected.
        language: SupportedLanguage,
        /// Reason reported by tree-sitter.
        message: String,
    },

    /// The parser returned no tree.
    #[error("the {language} parser produced no tree")]
    NoTree {
        /// Language being parsed.
        language: SupportedLanguage,
    },
}
