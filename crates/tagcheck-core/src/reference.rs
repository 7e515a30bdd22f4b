//! Image references and their registry-specific decomposition.
//!
//! An [`ImageReference`] is the reference as written in documentation. It is
//! the identity used for deduplication and reporting. A [`ParsedReference`]
//! is derived from it on demand and carries the repository path and tag a
//! registry lookup needs.
//!
//! # Splitting rules
//!
//! - `gcr.io/...`: the tag is whatever follows the **last** colon, unless that
//!   suffix contains a `/` (then the colon belonged to a `host:port` and the
//!   tag defaults to `latest`).
//! - Anything else: the tag is whatever follows the **first** colon. Names
//!   without a `/` are official images and live under `library/`.
//!
//! A missing or empty tag is `latest`.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::placeholder::is_unresolved;

/// Host prefix identifying Google Container Registry references.
pub const GCR_HOST_PREFIX: &str = "gcr.io/";

/// Tag assumed when a reference does not carry one.
pub const DEFAULT_TAG: &str = "latest";

/// Namespace official Docker Hub images live under.
const OFFICIAL_NAMESPACE: &str = "library";

/// An image reference as it appeared in documentation text.
///
/// Guaranteed non-empty, free of quotes and free of placeholder syntax.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageReference(String);

impl ImageReference {
    /// Creates a reference from raw text, stripping any quote characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyReference`] if nothing remains after quote
    /// stripping, or [`Error::UnresolvedPlaceholder`] if the text is a
    /// template rather than a concrete image.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagcheck_core::ImageReference;
    ///
    /// let reference = ImageReference::new("'minaprotocol/mina-daemon:3.0.0'")?;
    /// assert_eq!(reference.as_str(), "minaprotocol/mina-daemon:3.0.0");
    ///
    /// assert!(ImageReference::new("minaprotocol/mina-daemon:{tag}").is_err());
    /// # Ok::<(), tagcheck_core::Error>(())
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let cleaned = strip_quotes(raw.as_ref());

        if cleaned.is_empty() {
            return Err(Error::EmptyReference);
        }
        if is_unresolved(&cleaned) {
            return Err(Error::UnresolvedPlaceholder { reference: cleaned });
        }

        Ok(Self(cleaned))
    }

    /// Returns the reference text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decomposes the reference for a registry lookup.
    #[must_use]
    pub fn parse(&self) -> ParsedReference {
        ParsedReference::parse(&self.0)
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ImageReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ImageReference {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ImageReference {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ImageReference> for String {
    fn from(reference: ImageReference) -> Self {
        reference.0
    }
}

/// The registry a reference is validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryKind {
    /// Docker Hub tag API.
    DockerHub,
    /// Google Container Registry, Docker Registry HTTP API V2.
    Gcr,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DockerHub => f.write_str("Docker Hub"),
            Self::Gcr => f.write_str("GCR"),
        }
    }
}

/// A reference split into the fields its registry's API needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedReference {
    /// `gcr.io/<image_path>:<tag>`
    Gcr {
        /// Project and image path below the host, e.g. `my-proj/worker`.
        image_path: String,
        /// Image tag.
        tag: String,
    },
    /// `<image_name>:<tag>` on Docker Hub.
    DockerHub {
        /// Namespaced repository name, e.g. `minaprotocol/client` or `library/redis`.
        image_name: String,
        /// Image tag.
        tag: String,
    },
}

impl ParsedReference {
    /// Parses raw reference text. Never fails: every string lands in one of
    /// the three shapes described in the module docs.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagcheck_core::ParsedReference;
    ///
    /// assert_eq!(
    ///     ParsedReference::parse("gcr.io/my-proj/worker:abc123"),
    ///     ParsedReference::Gcr {
    ///         image_path: "my-proj/worker".to_string(),
    ///         tag: "abc123".to_string(),
    ///     }
    /// );
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let cleaned = strip_quotes(raw);

        if let Some(rest) = strip_gcr_prefix(&cleaned) {
            let (image_path, tag) = split_trailing_tag(rest);
            return Self::Gcr {
                image_path: image_path.to_string(),
                tag,
            };
        }

        let (name, tag) = split_first_colon(&cleaned);
        let image_name = if cleaned.contains('/') {
            name.to_string()
        } else {
            format!("{OFFICIAL_NAMESPACE}/{name}")
        };

        Self::DockerHub { image_name, tag }
    }

    /// Returns the registry this reference belongs to.
    #[must_use]
    pub const fn kind(&self) -> RegistryKind {
        match self {
            Self::Gcr { .. } => RegistryKind::Gcr,
            Self::DockerHub { .. } => RegistryKind::DockerHub,
        }
    }

    /// Returns the repository path used in the registry URL.
    #[must_use]
    pub fn repository(&self) -> &str {
        match self {
            Self::Gcr { image_path, .. } => image_path,
            Self::DockerHub { image_name, .. } => image_name,
        }
    }

    /// Returns the tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Gcr { tag, .. } | Self::DockerHub { tag, .. } => tag,
        }
    }
}

impl fmt::Display for ParsedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.kind(), self.repository(), self.tag())
    }
}

fn strip_quotes(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '\'' | '"')).collect()
}

/// Host matching is ASCII case-insensitive, like extraction.
fn strip_gcr_prefix(reference: &str) -> Option<&str> {
    let prefix = reference.get(..GCR_HOST_PREFIX.len())?;
    prefix
        .eq_ignore_ascii_case(GCR_HOST_PREFIX)
        .then(|| &reference[GCR_HOST_PREFIX.len()..])
}

fn split_trailing_tag(rest: &str) -> (&str, String) {
    match rest.rsplit_once(':') {
        Some((path, tag)) if !tag.contains('/') => (path, tag_or_default(tag)),
        _ => (rest, DEFAULT_TAG.to_string()),
    }
}

fn split_first_colon(reference: &str) -> (&str, String) {
    match reference.split_once(':') {
        Some((name, tag)) => (name, tag_or_default(tag)),
        None => (reference, DEFAULT_TAG.to_string()),
    }
}

fn tag_or_default(tag: &str) -> String {
    if tag.is_empty() {
        DEFAULT_TAG.to_string()
    } else {
        tag.to_string()
    }
}
