//! Error types for tagcheck core operations.
//!
//! This module defines the error types used throughout the `tagcheck-core` crate.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing core types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The reference string was empty after quote stripping.
    #[error("Image reference is empty")]
    EmptyReference,

    /// The reference still contains template placeholder syntax.
    #[error("Image reference contains an unresolved placeholder: {reference}")]
    UnresolvedPlaceholder {
        /// The offending reference.
        reference: String,
    },
}
