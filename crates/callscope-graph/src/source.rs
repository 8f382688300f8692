//! Source unit discovery and module naming.
//!
//! A [`SourceTree`] lists the Python files under an analysis root up front,
//! so the number of files found is known before any of them is read. Files
//! are then read lazily through [`SourceTree::units`]; a file that cannot be
//! read or is not valid UTF-8 is skipped without failing the run.

use std::collections::BTreeSet;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use callscope_syntax::SupportedLanguage;

use crate::error::GraphError;

/// Directory names that are never descended into.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "__pycache__",
    ".git",
    ".venv",
    "venv",
    "env",
    ".mypy_cache",
];

/// One readable source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    path: Utf8PathBuf,
    module_name: String,
    text: String,
}

impl SourceUnit {
    /// Returns the absolute path of the file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the dotted module name derived from the path.
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Returns the decoded file contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The Python files found under an analysis root, in walk order.
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: Utf8PathBuf,
    files: Vec<Utf8PathBuf>,
    single_file: bool,
}

impl SourceTree {
    /// Discovers the source files under `requested`.
    ///
    /// `requested` may be a directory or a single file. Directories are walked in
    /// file-name order, pruning any directory named in
    /// [`DEFAULT_SKIP_DIRS`] or `extra_skip_dirs`.
    ///
    /// # Errors
    ///
    /// Returns an error if `requested` does not exist, cannot be canonicalised,
    /// resolves to a non-UTF-8 path, or cannot be opened for walking.
    pub fn discover(requested: &Utf8Path, extra_skip_dirs: &[String]) -> Result<Self, GraphError> {
        let root = canonical_root(requested)?;

        if root.is_file() {
            let files = if is_source_file(&root) {
                vec![root.clone()]
            } else {
                Vec::new()
            };
            return Ok(Self {
                root,
                files,
                single_file: true,
            });
        }

        let skip: BTreeSet<&str> = DEFAULT_SKIP_DIRS
            .iter()
            .copied()
            .chain(extra_skip_dirs.iter().map(String::as_str))
            .collect();

        let mut files = Vec::new();
        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_skipped_dir(entry, &skip));

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(error) if error.depth() == 0 => {
                    let message = format!("failed to walk {root}");
                    return Err(GraphError::io(message, io::Error::from(error)));
                }
                Err(error) => {
                    debug!(target: "callscope::source", %error, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match Utf8PathBuf::from_path_buf(entry.into_path()) {
                Ok(path) if is_source_file(&path) => files.push(path),
                Ok(_) => {}
                Err(path) => {
                    debug!(
                        target: "callscope::source",
                        path = %path.display(),
                        "skipping non-UTF-8 path"
                    );
                }
            }
        }

        debug!(
            target: "callscope::source",
            root = %root,
            files = files.len(),
            "discovered source files"
        );
        Ok(Self {
            root,
            files,
            single_file: false,
        })
    }

    /// Returns the canonicalised analysis root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the number of files found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns whether no files were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns the module name for a discovered file.
    #[must_use]
    pub fn module_name_of(&self, file: &Utf8Path) -> String {
        if self.single_file {
            return file.file_stem().unwrap_or_default().to_owned();
        }
        module_name(&self.root, file)
    }

    /// Reads the discovered files in order, skipping any that cannot be read
    /// or decoded.
    pub fn units(&self) -> impl Iterator<Item = SourceUnit> + '_ {
        self.files.iter().filter_map(|path| {
            read_source(path).map(|text| SourceUnit {
                path: path.clone(),
                module_name: self.module_name_of(path),
                text,
            })
        })
    }
}

/// Maps a file to a dotted module name: its path relative to `root` with
/// the extension stripped.
///
/// `root/pkg/engine.py` becomes `pkg.engine`. A file outside `root` keeps
/// its whole path.
#[must_use]
pub fn module_name(root: &Utf8Path, file: &Utf8Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let stripped = relative.with_extension("");
    stripped
        .components()
        .map(|component| component.as_str())
        .filter(|part| !matches!(*part, "/" | "." | ""))
        .collect::<Vec<_>>()
        .join(".")
}

/// Reads a file as UTF-8, dropping a leading byte-order mark.
///
/// Returns `None`, after logging at debug level, when the file cannot be
/// read or is not valid UTF-8.
#[must_use]
pub fn read_source(path: &Utf8Path) -> Option<String> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) => {
            debug!(target: "callscope::source", path = %path, %error, "skipping unreadable file");
            return None;
        }
    };
    match String::from_utf8(bytes) {
        Ok(mut text) => {
            if text.starts_with('\u{feff}') {
                text.remove(0);
            }
            Some(text)
        }
        Err(error) => {
            debug!(target: "callscope::source", path = %path, %error, "skipping non-UTF-8 file");
            None
        }
    }
}

fn canonical_root(root: &Utf8Path) -> Result<Utf8PathBuf, GraphError> {
    let canonical = std::fs::canonicalize(root).map_err(|error| {
        if error.kind() == io::ErrorKind::NotFound {
            GraphError::root_not_found(root)
        } else {
            GraphError::io(format!("failed to resolve {root}"), error)
        }
    })?;
    Utf8PathBuf::from_path_buf(canonical).map_err(GraphError::non_utf8_root)
}

fn is_source_file(path: &Utf8Path) -> bool {
    SupportedLanguage::from_path(path.as_std_path()).is_some()
}

fn is_skipped_dir(entry: &DirEntry, skip: &BTreeSet<&str>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| skip.contains(name))
}
