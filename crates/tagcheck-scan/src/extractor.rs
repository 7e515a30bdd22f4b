//! Image reference extraction from documentation text.
//!
//! Three pattern rules are tried in precedence order, all case-insensitive:
//!
//! 1. `gcr.io/<project>/<image>:<tag>`
//! 2. `minaprotocol/<image>:<tag>`
//! 3. `image: "<value>"` / `image: '<value>'`, capturing only the quoted value
//!
//! Once a rule claims a span of text, later rules skip captures overlapping
//! it, so `gcr.io/minaprotocol/daemon:1.0` is one GCR reference and not also a
//! Docker Hub one. Captures that are templates (see
//! [`tagcheck_core::placeholder`]) are dropped.

use std::ops::Range;
use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use tagcheck_core::{ImageInventory, ImageReference};

use crate::error::{Result, ScanError};

static GCR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)gcr\.io/[a-z0-9_.-]+/[a-z0-9_.-]+:[a-z0-9_.-]+").expect("valid GCR pattern")
});

static NAMESPACED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)minaprotocol/[a-z0-9_.-]+:[a-z0-9_.-]+").expect("valid namespace pattern")
});

static IMAGE_KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)image:\s*['"]([^'"]+)['"]"#).expect("valid image key pattern")
});

/// One way an image reference can appear in text.
#[derive(Debug, Clone, Copy)]
struct PatternRule {
    name: &'static str,
    regex: &'static Regex,
    /// Capture group holding the reference; 0 is the whole match.
    group: usize,
}

fn rules() -> [PatternRule; 3] {
    [
        PatternRule {
            name: "gcr",
            regex: &GCR_PATTERN,
            group: 0,
        },
        PatternRule {
            name: "namespaced",
            regex: &NAMESPACED_PATTERN,
            group: 0,
        },
        PatternRule {
            name: "image-key",
            regex: &IMAGE_KEY_PATTERN,
            group: 1,
        },
    ]
}

/// Extracts image references from documentation files.
#[derive(Debug, Default, Clone, Copy)]
pub struct Extractor;

impl Extractor {
    /// Creates an extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Extracts every concrete image reference from one file's text.
    ///
    /// `file` is recorded verbatim as the location of each reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagcheck_scan::Extractor;
    ///
    /// let text = "docker run minaprotocol/mina-daemon:3.0.0 and image: 'redis:7'";
    /// let inventory = Extractor::new().extract("install.md", text);
    ///
    /// assert!(inventory.contains("minaprotocol/mina-daemon:3.0.0"));
    /// assert!(inventory.contains("redis:7"));
    /// ```
    #[must_use]
    pub fn extract(&self, file: &str, content: &str) -> ImageInventory {
        let mut inventory = ImageInventory::new();
        let mut claimed: Vec<Range<usize>> = Vec::new();

        for rule in &rules() {
            let mut spans = Vec::new();

            for captures in rule.regex.captures_iter(content) {
                let Some(capture) = captures.get(rule.group) else {
                    continue;
                };

                let span = capture.range();
                if claimed.iter().any(|c| overlaps(c, &span)) {
                    continue;
                }
                spans.push(span);

                match ImageReference::new(capture.as_str()) {
                    Ok(reference) => {
                        inventory.record(reference, file);
                    }
                    Err(e) => {
                        debug!(
                            file,
                            rule = rule.name,
                            capture = capture.as_str(),
                            reason = %e,
                            "Skipping reference"
                        );
                    }
                }
            }

            claimed.extend(spans);
        }

        inventory
    }

    /// Reads each file and folds the per-file inventories.
    ///
    /// Locations are recorded relative to `root` with `/` separators.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::FileRead`] if a file cannot be read. Invalid
    /// UTF-8 is decoded lossily rather than rejected.
    pub fn scan_files(&self, root: &Path, files: &[PathBuf]) -> Result<ImageInventory> {
        let inventory = files.iter().try_fold(ImageInventory::new(), |mut acc, path| {
            let bytes = std::fs::read(path).map_err(|e| ScanError::FileRead {
                path: path.clone(),
                source: e,
            })?;
            let content = String::from_utf8_lossy(&bytes);

            let relative = relative_location(root, path);
            let found = self.extract(&relative, &content);
            debug!(file = %relative, references = found.len(), "Scanned file");

            acc.merge(found);
            Ok::<_, ScanError>(acc)
        })?;

        info!(references = inventory.len(), "Extraction complete");

        Ok(inventory)
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Path of `file` below `root`, joined with `/` regardless of platform.
fn relative_location(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
