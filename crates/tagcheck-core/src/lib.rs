//! # Tagcheck Core
//!
//! Core types for checking container-image references found in documentation.
//!
//! This crate provides the data model shared by the scanner, the registry
//! client and the CLI:
//!
//! - [`ImageReference`] - An image+tag string exactly as written in a document
//! - [`ParsedReference`] - A reference decomposed into the fields a registry lookup needs
//! - [`RegistryKind`] - The registry a reference resolves against
//! - [`ImageInventory`] - Every unique reference with the files it appears in
//!
//! ## Example
//!
//! ```rust
//! use tagcheck_core::{ParsedReference, RegistryKind};
//!
//! let parsed = ParsedReference::parse("redis:7");
//! assert_eq!(parsed.kind(), RegistryKind::DockerHub);
//! assert_eq!(parsed.repository(), "library/redis");
//! assert_eq!(parsed.tag(), "7");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod inventory;
pub mod placeholder;
pub mod reference;


pub use error::{Error, Result};
pub use inventory::ImageInventory;
pub use placeholder::{has_incomplete_tag, has_template_placeholder, is_unresolved};
pub use reference::{ImageReference, ParsedReference, RegistryKind, DEFAULT_TAG, GCR_HOST_PREFIX};
