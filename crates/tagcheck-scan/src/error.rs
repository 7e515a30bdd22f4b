//! Error types for documentation scanning.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that abort discovery or extraction.
///
/// Every variant is fatal to a run: a documentation tree that cannot be read
/// completely cannot be checked completely.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The documentation root does not exist.
    #[error("Documentation root does not exist: {path}")]
    RootNotFound {
        /// Root path.
        path: PathBuf,
    },

    /// The documentation root is not a directory.
    #[error("Documentation root is not a directory: {path}")]
    NotADirectory {
        /// Root path.
        path: PathBuf,
    },

    /// Walking the tree failed.
    #[error("Failed to walk {path}: {source}")]
    Walk {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying walk error.
        #[source]
        source: walkdir::Error,
    },

    /// A documentation file could not be read as UTF-8 text.
    #[error("Failed to read documentation file {path}: {source}")]
    FileRead {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
