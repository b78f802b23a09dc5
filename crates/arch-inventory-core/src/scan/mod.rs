//! Line-oriented text scanners.
//!
//! Neither scanner parses Rust. They match the conventional subset of
//! declaration and `use` syntax found in a hexagonal workspace; anything
//! outside that subset is silently missed.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

pub mod declarations;
pub mod usages;

pub use declarations::{collect_public_items, collect_type_definitions};
pub use usages::UsageScanner;

/// Errors that can occur while scanning a source tree.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A source file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("Failed to walk {root}: {source}")]
    Walk {
        /// Root being walked.
        root: PathBuf,
        /// Underlying walk error.
        source: walkdir::Error,
    },
}

/// A workspace on disk whose source files are scanned as plain text.
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
    extension: String,
}

impl SourceTree {
    /// Creates a tree rooted at `root` that scans `*.rs` files.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "rs".to_string(),
        }
    }

    /// Overrides the scanned file extension (without the dot).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Returns the workspace root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists source files under `dir` (relative to the root), sorted.
    ///
    /// A missing directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the traversal fails part-way.
    pub fn files_under(&self, dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let start = self.root.join(dir);
        if !start.exists() {
            debug!("Scan root {} does not exist, skipping", start.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&start).follow_links(true) {
            let entry = entry.map_err(|e| ScanError::Walk {
                root: start.clone(),
                source: e,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str()) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        debug!("Found {} files under {}", files.len(), start.display());
        Ok(files)
    }

    /// Reads a source file fully.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8 text.
    pub fn read(&self, path: &Path) -> Result<String, ScanError> {
        std::fs::read_to_string(path).map_err(|e| ScanError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Formats `path` relative to the root with `/` separators.
    ///
    /// Paths outside the root are returned as given.
    #[must_use]
    pub fn relative(&self, path: &Path) -> String {
        let Ok(rel) = path.strip_prefix(&self.root) else {
            return path.display().to_string();
        };
        rel.components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        let tree = SourceTree::new(tmp.path());
        let files = tree.files_under(Path::new("crates/nope/src")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn files_are_recursive_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("b/deep")).unwrap();
        fs::write(src.join("b/deep/z.rs"), "").unwrap();
        fs::write(src.join("a.rs"), "").unwrap();
        fs::write(src.join("notes.md"), "").unwrap();

        let tree = SourceTree::new(tmp.path());
        let files = tree.files_under(Path::new("src")).unwrap();
        let rel: Vec<String> = files.iter().map(|f| tree.relative(f)).collect();
        assert_eq!(rel, vec!["src/a.rs", "src/b/deep/z.rs"]);
    }

    #[test]
    fn relative_uses_forward_slashes() {
        let tree = SourceTree::new("/work");
        let rel = tree.relative(&Path::new("/work").join("crates").join("x").join("lib.rs"));
        assert_eq!(rel, "crates/x/lib.rs");
    }

    #[test]
    fn relative_keeps_paths_outside_root() {
        let tree = SourceTree::new("/work");
        let outside = Path::new("/tmp").join("x").join("plan.md");
        assert_eq!(tree.relative(&outside), outside.display().to_string());
    }
}
