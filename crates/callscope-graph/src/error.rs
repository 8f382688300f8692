//! Error types for call graph analysis.
//!
//! Only problems with the analysis root and parser set-up are fatal. A file
//! that cannot be read, decoded, or parsed simply contributes nothing.

use std::path::PathBuf;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

use callscope_syntax::SyntaxError;

/// Errors returned by call graph analysis.
#[derive(Debug, Clone, Error)]
pub enum GraphError {
    /// The analysis root does not exist.
    #[error("analysis root not found: {path}")]
    RootNotFound {
        /// The path that was requested.
        path: Utf8PathBuf,
    },

    /// The analysis root resolved to a path that is not valid UTF-8.
    #[error("analysis root is not valid UTF-8: {}", path.display())]
    NonUtf8Root {
        /// The canonicalised path.
        path: PathBuf,
    },

    /// An IO error occurred while resolving or walking the analysis root.
    #[error("IO error: {message}")]
    Io {
        /// Description of the IO error.
        message: String,
        /// Underlying error wrapped in Arc for Clone support.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The parser could not be set up.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl GraphError {
    /// Creates a new `RootNotFound` error.
    #[must_use]
    pub fn root_not_found(path: impl Into<Utf8PathBuf>) -> Self {
        Self::RootNotFound { path: path.into() }
    }

    /// Creates a new `NonUtf8Root` error.
    #[must_use]
    pub fn non_utf8_root(path: impl Into<PathBuf>) -> Self {
        Self::NonUtf8Root { path: path.into() }
    }

    /// Creates a new `Io` error.
    #[must_use]
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }
}
