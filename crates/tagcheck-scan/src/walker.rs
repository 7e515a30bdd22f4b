//! Documentation file discovery.
//!
//! Recursively enumerates the Markdown/MDX files under a documentation root.
//!
//! # Discovery Process
//!
//! 1. Validate that the root exists and is a directory
//! 2. Walk the tree, pruning dependency caches (`node_modules`) and hidden
//!    directories without descending into them
//! 3. Keep regular files whose name ends in a documentation extension
//!
//! Symbolic links are followed; a link cycle is reported as a walk error.
//!
//! Entries are visited in file-name order within each directory, so the
//! result is deterministic for a fixed tree.
//!
//! # Example
//!
//! ```rust,no_run
//! use tagcheck_scan::DocWalker;
//!
//! let files = DocWalker::new().walk("docs/")?;
//! println!("Found {} documentation files", files.len());
//! # Ok::<(), tagcheck_scan::ScanError>(())
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, ScanError};

/// Configuration for documentation discovery.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// File name suffixes treated as documentation.
    pub extensions: Vec<String>,
    /// Directory names that are never descended into.
    pub exclude_dirs: Vec<String>,
    /// Whether directories starting with `.` are pruned.
    pub skip_hidden: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            extensions: vec![".mdx".to_string(), ".md".to_string()],
            exclude_dirs: vec!["node_modules".to_string()],
            skip_hidden: true,
        }
    }
}

impl WalkConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory name to exclude.
    #[must_use]
    pub fn exclude_dir(mut self, dir: impl Into<String>) -> Self {
        self.exclude_dirs.push(dir.into());
        self
    }

    /// Adds a documentation file suffix (e.g. `.markdown`).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extensions.push(extension.into());
        self
    }

    /// Sets whether hidden directories are pruned.
    #[must_use]
    pub const fn with_skip_hidden(mut self, skip_hidden: bool) -> Self {
        self.skip_hidden = skip_hidden;
        self
    }

    fn is_pruned_dir(&self, name: &str) -> bool {
        (self.skip_hidden && name.starts_with('.')) || self.exclude_dirs.iter().any(|d| d == name)
    }

    fn is_doc_file(&self, name: &str) -> bool {
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

/// Documentation file walker.
#[derive(Debug, Default)]
pub struct DocWalker {
    config: WalkConfig,
}

impl DocWalker {
    /// Creates a walker with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a walker with custom configuration.
    #[must_use]
    pub const fn with_config(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Returns the walker configuration.
    #[must_use]
    pub const fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Lists every documentation file under `root`.
    ///
    /// Each call walks the tree afresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is missing, is not a directory, or any
    /// directory in the tree cannot be read.
    pub fn walk(&self, root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let root = root.as_ref();

        if !root.exists() {
            return Err(ScanError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        info!(path = %root.display(), "Scanning documentation tree");

        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| self.keep(entry));

        for entry in walker {
            let entry = entry.map_err(|e| ScanError::Walk {
                path: e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf),
                source: e,
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if self.config.is_doc_file(&name) {
                debug!(file = %entry.path().display(), "Found documentation file");
                files.push(entry.into_path());
            }
        }

        info!(files = files.len(), "Discovery complete");

        Ok(files)
    }

    /// The root is always kept, even when it is `.` or a hidden directory.
    fn keep(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        let name = entry.file_name().to_string_lossy();
        if self.config.is_pruned_dir(&name) {
            debug!(dir = %entry.path().display(), "Skipping excluded directory");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# doc\n").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_finds_md_and_mdx_recursively() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "index.mdx");
        touch(temp.path(), "node-operators/setup.md");
        touch(temp.path(), "node-operators/deep/archive.mdx");
        touch(temp.path(), "node-operators/config.yaml");
        touch(temp.path(), "readme.txt");

        let files = DocWalker::new().walk(temp.path()).unwrap();

        assert_eq!(
            relative(temp.path(), &files),
            [
                "index.mdx",
                "node-operators/deep/archive.mdx",
                "node-operators/setup.md",
            ]
        );
    }

    #[test]
    fn test_prunes_node_modules_and_hidden_dirs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "guide.md");
        touch(temp.path(), "node_modules/pkg/README.md");
        touch(temp.path(), ".docusaurus/cache.mdx");
        touch(temp.path(), "nested/.git/notes.md");

        let files = DocWalker::new().walk(temp.path()).unwrap();

        assert_eq!(relative(temp.path(), &files), ["guide.md"]);
    }

    #[test]
    fn test_hidden_files_are_not_pruned() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".hidden.md");

        let files = DocWalker::new().walk(temp.path()).unwrap();

        assert_eq!(relative(temp.path(), &files), [".hidden.md"]);
    }

    #[test]
    fn test_hidden_root_is_walked() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(".docs");
        touch(&root, "page.md");

        let files = DocWalker::new().walk(&root).unwrap();

        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_custom_exclusions_and_extensions() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.md");
        touch(temp.path(), "b.markdown");
        touch(temp.path(), "build/c.md");

        let config = WalkConfig::new().exclude_dir("build").with_extension(".markdown");
        let files = DocWalker::with_config(config).walk(temp.path()).unwrap();

        assert_eq!(relative(temp.path(), &files), ["a.md", "b.markdown"]);
    }

    #[test]
    fn test_repeated_walks_are_identical() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b.md");
        touch(temp.path(), "a.md");
        touch(temp.path(), "c/d.mdx");

        let walker = DocWalker::new();
        assert_eq!(walker.walk(temp.path()).unwrap(), walker.walk(temp.path()).unwrap());
    }

    #[test]
    fn test_hidden_dirs_walked_when_not_skipped() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "guide.md");
        touch(temp.path(), ".well-known/notes.md");

        let walker = DocWalker::with_config(WalkConfig::new().with_skip_hidden(false));
        assert!(!walker.config().skip_hidden);

        let files = walker.walk(temp.path()).unwrap();
        assert_eq!(relative(temp.path(), &files), [".well-known/notes.md", "guide.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_follows_symlinked_files_and_dirs() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let root = temp.path().join("docs");
        let shared = temp.path().join("shared");
        touch(&shared, "shared.md");
        fs::create_dir_all(&root).unwrap();
        symlink(shared.join("shared.md"), root.join("linked.md")).unwrap();
        symlink(&shared, root.join("linkdir")).unwrap();

        let files = DocWalker::new().walk(&root).unwrap();

        assert_eq!(relative(&root, &files), ["linkdir/shared.md", "linked.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_is_an_error() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        touch(temp.path(), "nested/page.md");
        symlink(temp.path(), temp.path().join("nested").join("loop")).unwrap();

        let err = DocWalker::new().walk(temp.path()).unwrap_err();
        assert!(matches!(err, ScanError::Walk { .. }));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = DocWalker::new().walk(temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound { .. }));
    }

    #[test]
    fn test_file_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "single.md");

        let err = DocWalker::new().walk(temp.path().join("single.md")).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
    }
}
