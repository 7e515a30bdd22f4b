//! Outcome of a single registry lookup.

use serde::Serialize;
use tagcheck_core::{ImageReference, RegistryKind};

/// Classification of a [`ValidationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// The registry confirmed the image exists.
    Valid,
    /// The registry answered and the image does not exist.
    Invalid,
    /// The registry could not be asked; existence is unknown.
    Errored,
}

/// Result of checking one reference against its registry.
///
/// Exactly one of `status_code` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// The reference that was checked.
    pub reference: ImageReference,
    /// Registry the reference was checked against.
    pub registry: RegistryKind,
    /// Whether the registry confirmed existence.
    pub exists: bool,
    /// HTTP status of the lookup, when the registry answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Transport error message, when the registry could not be reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    /// Creates a result from a registry response.
    #[must_use]
    pub const fn answered(
        reference: ImageReference,
        registry: RegistryKind,
        status_code: u16,
        exists: bool,
    ) -> Self {
        Self {
            reference,
            registry,
            exists,
            status_code: Some(status_code),
            error: None,
        }
    }

    /// Creates a result for a lookup that never got an answer.
    #[must_use]
    pub fn failed(reference: ImageReference, registry: RegistryKind, error: impl Into<String>) -> Self {
        Self {
            reference,
            registry,
            exists: false,
            status_code: None,
            error: Some(error.into()),
        }
    }

    /// Classifies the result.
    #[must_use]
    pub const fn status(&self) -> ValidationStatus {
        if self.exists {
            ValidationStatus::Valid
        } else if self.error.is_some() {
            ValidationStatus::Errored
        } else {
            ValidationStatus::Invalid
        }
    }
}
