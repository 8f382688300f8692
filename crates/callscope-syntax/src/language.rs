//! Source language recognition.

use std::fmt;
use std::path::Path;

/// Languages the extractor can parse.
///
/// Only Python is recognised. Stub files (`.pyi`) and compiled artefacts are
/// deliberately not source units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SupportedLanguage {
    /// Python source files (`.py`).
    #[default]
    Python,
}

impl SupportedLanguage {
    /// Maps a file extension, without the leading dot, onto a language.
    ///
    /// Matching ignores ASCII case.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        extension
            .eq_ignore_ascii_case("py")
            .then_some(Self::Python)
    }

    /// Maps a path onto a language by its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str().and_then(Self::from_extension)
    }

    /// Grammar used to build the parser.
    #[must_use]
    pub fn grammar(self) -> tree_sitter::Language {
        match self {
            Self::Python => tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Python => f.write_str("python"),
        }
    }
}
