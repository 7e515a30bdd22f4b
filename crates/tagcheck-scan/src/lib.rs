//! # Tagcheck Scan
//!
//! Finds container-image references in a documentation tree.
//!
//! Scanning is two steps:
//!
//! - [`DocWalker`] lists the Markdown/MDX files under a root, pruning
//!   `node_modules` and hidden directories
//! - [`Extractor`] pulls image references out of each file and folds them
//!   into one [`ImageInventory`](tagcheck_core::ImageInventory)
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tagcheck_scan::{DocWalker, Extractor};
//!
//! let root = Path::new("docs");
//! let files = DocWalker::new().walk(root)?;
//! let inventory = Extractor::new().scan_files(root, &files)?;
//!
//! for (reference, files) in inventory.iter() {
//!     println!("{reference}: {} file(s)", files.len());
//! }
//! # Ok::<(), tagcheck_scan::ScanError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod extractor;
pub mod walker;

pub use error::{Result, ScanError};
pub use extractor::Extractor;
pub use walker::{DocWalker, WalkConfig};

use std::path::Path;

use tagcheck_core::ImageInventory;

/// Walks `root` and extracts every image reference found under it.
///
/// # Errors
///
/// Returns an error if the tree cannot be walked or a file cannot be read.
pub fn scan(root: impl AsRef<Path>, config: WalkConfig) -> Result<ImageInventory> {
    let root = root.as_ref();
    let files = DocWalker::with_config(config).walk(root)?;
    Extractor::new().scan_files(root, &files)
}
