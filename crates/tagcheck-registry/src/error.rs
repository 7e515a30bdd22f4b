//! Error types for registry operations.

use thiserror::Error;

/// Errors that can occur while setting up or performing a registry lookup.
///
/// Lookup errors never escape [`RegistryClient::validate`](crate::RegistryClient::validate);
/// they are recorded on the [`ValidationResult`](crate::ValidationResult) instead.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A configured API base URL is not a valid absolute URL.
    #[error("Invalid registry URL '{url}': {reason}")]
    InvalidUrl {
        /// URL string.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {source}")]
    ClientBuild {
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timeout")]
    Timeout {
        /// Requested URL.
        url: String,
    },

    /// Failed to connect to the registry.
    #[error("Failed to connect to registry at {url}: {source}")]
    ConnectionFailed {
        /// Requested URL.
        url: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// Any other transport failure.
    #[error("Request to {url} failed: {source}")]
    RequestFailed {
        /// Requested URL.
        url: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map_or_else(|| "unknown".to_string(), ToString::to_string);

        if err.is_timeout() {
            Self::Timeout { url }
        } else if err.is_connect() {
            Self::ConnectionFailed { url, source: err }
        } else {
            Self::RequestFailed { url, source: err }
        }
    }
}
