//! Registry existence-check client.
//!
//! This module provides the client that asks Docker Hub or GCR whether an
//! image tag exists.

use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use tracing::{debug, warn};

use tagcheck_core::{ImageReference, ParsedReference, RegistryKind};

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::result::ValidationResult;

/// Manifest media type requested from GCR.
pub const GCR_MANIFEST_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

/// Client for checking image existence on Docker Hub and GCR.
#[derive(Debug)]
pub struct RegistryClient {
    config: RegistryConfig,
    http: reqwest::Client,
}

impl RegistryClient {
    /// Creates a new registry client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL is invalid or the HTTP client cannot be
    /// created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tagcheck_registry::{RegistryClient, RegistryConfig};
    ///
    /// let client = RegistryClient::new(RegistryConfig::new())?;
    /// # Ok::<(), tagcheck_registry::RegistryError>(())
    /// ```
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        config.validate()?;
        let http = Self::build_http_client(&config)?;

        Ok(Self { config, http })
    }

    /// Returns the registry configuration.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Checks whether the referenced image exists on its registry.
    ///
    /// Never fails: transport errors are recorded on the result.
    pub async fn validate(&self, reference: &ImageReference) -> ValidationResult {
        let parsed = reference.parse();
        let registry = parsed.kind();

        match self.lookup(&parsed).await {
            Ok(status) => {
                let exists = Self::confirms_existence(registry, status);
                debug!(%reference, %registry, status = status.as_u16(), exists, "Registry answered");
                ValidationResult::answered(reference.clone(), registry, status.as_u16(), exists)
            }
            Err(e) => {
                warn!(%reference, %registry, error = %e, "Registry lookup failed");
                ValidationResult::failed(reference.clone(), registry, e.to_string())
            }
        }
    }

    /// Returns the lookup URL for a parsed reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagcheck_core::ParsedReference;
    /// use tagcheck_registry::{RegistryClient, RegistryConfig};
    ///
    /// let client = RegistryClient::new(RegistryConfig::new())?;
    /// assert_eq!(
    ///     client.lookup_url(&ParsedReference::parse("redis:7")),
    ///     "https://hub.docker.com/v2/repositories/library/redis/tags/7"
    /// );
    /// # Ok::<(), tagcheck_registry::RegistryError>(())
    /// ```
    #[must_use]
    pub fn lookup_url(&self, parsed: &ParsedReference) -> String {
        match parsed {
            ParsedReference::DockerHub { image_name, tag } => {
                format!("{}/{image_name}/tags/{tag}", self.config.docker_hub_api)
            }
            ParsedReference::Gcr { image_path, tag } => {
                format!("{}/{image_path}/manifests/{tag}", self.config.gcr_api)
            }
        }
    }

    /// Issues the single lookup request and returns the response status.
    async fn lookup(&self, parsed: &ParsedReference) -> Result<StatusCode, RegistryError> {
        let url = self.lookup_url(parsed);
        debug!(%url, "Checking registry");

        let mut request = self.http.get(&url);
        if parsed.kind() == RegistryKind::Gcr {
            request = request.header(ACCEPT, GCR_MANIFEST_MEDIA_TYPE);
        }

        let response = request.send().await?;
        Ok(response.status())
    }

    /// GCR answers some valid manifest requests with a temporary redirect.
    fn confirms_existence(registry: RegistryKind, status: StatusCode) -> bool {
        match registry {
            RegistryKind::DockerHub => status == StatusCode::OK,
            RegistryKind::Gcr => {
                status == StatusCode::OK || status == StatusCode::TEMPORARY_REDIRECT
            }
        }
    }

    /// Builds the HTTP client. Redirects are not followed so a GCR 307 is
    /// observed as-is.
    fn build_http_client(config: &RegistryConfig) -> Result<reqwest::Client, RegistryError> {
        reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .redirect(Policy::none())
            .build()
            .map_err(|e| RegistryError::ClientBuild { source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client() -> RegistryClient {
        RegistryClient::new(RegistryConfig::new()).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let config = RegistryConfig::new().with_timeout(Duration::from_secs(3));
        let client = RegistryClient::new(config.clone()).unwrap();
        assert_eq!(client.config(), &config);
    }

    #[test]
    fn test_client_rejects_invalid_base() {
        let config = RegistryConfig::new().with_docker_hub_api("hub.docker.com");
        assert!(matches!(
            RegistryClient::new(config),
            Err(RegistryError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_docker_hub_lookup_url() {
        let parsed = ParsedReference::parse("minaprotocol/mina-daemon:3.0.0");
        assert_eq!(
            client().lookup_url(&parsed),
            "https://hub.docker.com/v2/repositories/minaprotocol/mina-daemon/tags/3.0.0"
        );
    }

    #[test]
    fn test_gcr_lookup_url() {
        let parsed = ParsedReference::parse("gcr.io/o1labs-192920/mina-archive:3.0.0");
        assert_eq!(
            client().lookup_url(&parsed),
            "https://gcr.io/v2/o1labs-192920/mina-archive/manifests/3.0.0"
        );
    }

    #[test]
    fn test_lookup_url_uses_configured_bases() {
        let config = RegistryConfig::new()
            .with_docker_hub_api("http://127.0.0.1:9000/hub/")
            .with_gcr_api("http://127.0.0.1:9000/v2")
            .with_timeout(Duration::from_secs(1));
        let client = RegistryClient::new(config).unwrap();

        assert_eq!(
            client.lookup_url(&ParsedReference::parse("nginx")),
            "http://127.0.0.1:9000/hub/library/nginx/tags/latest"
        );
        assert_eq!(
            client.lookup_url(&ParsedReference::parse("gcr.io/p/i")),
            "http://127.0.0.1:9000/v2/p/i/manifests/latest"
        );
    }

    #[test]
    fn test_confirms_existence() {
        use RegistryKind::{DockerHub, Gcr};

        assert!(RegistryClient::confirms_existence(DockerHub, StatusCode::OK));
        assert!(!RegistryClient::confirms_existence(DockerHub, StatusCode::TEMPORARY_REDIRECT));
        assert!(!RegistryClient::confirms_existence(DockerHub, StatusCode::NOT_FOUND));

        assert!(RegistryClient::confirms_existence(Gcr, StatusCode::OK));
        assert!(RegistryClient::confirms_existence(Gcr, StatusCode::TEMPORARY_REDIRECT));
        assert!(!RegistryClient::confirms_existence(Gcr, StatusCode::UNAUTHORIZED));
        assert!(!RegistryClient::confirms_existence(Gcr, StatusCode::NOT_FOUND));
    }
}
