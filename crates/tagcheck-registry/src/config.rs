//! Configuration types for the registry client.

use std::time::Duration;

use url::Url;

use crate::error::RegistryError;

/// Docker Hub repository API base.
pub const DEFAULT_DOCKER_HUB_API: &str = "https://hub.docker.com/v2/repositories";

/// GCR Docker Registry V2 API base.
pub const DEFAULT_GCR_API: &str = "https://gcr.io/v2";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the registry client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Docker Hub API base, without trailing slash.
    pub docker_hub_api: String,

    /// GCR V2 API base, without trailing slash.
    pub gcr_api: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryConfig {
    /// Creates a configuration pointing at the public registries.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagcheck_registry::RegistryConfig;
    ///
    /// let config = RegistryConfig::new();
    /// assert_eq!(config.gcr_api, "https://gcr.io/v2");
    /// assert_eq!(config.timeout.as_secs(), 10);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            docker_hub_api: DEFAULT_DOCKER_HUB_API.to_string(),
            gcr_api: DEFAULT_GCR_API.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("tagcheck/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the Docker Hub API base.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagcheck_registry::RegistryConfig;
    ///
    /// let config = RegistryConfig::new().with_docker_hub_api("http://localhost:8080/v2/repositories/");
    /// assert_eq!(config.docker_hub_api, "http://localhost:8080/v2/repositories");
    /// ```
    #[must_use]
    pub fn with_docker_hub_api(mut self, url: impl Into<String>) -> Self {
        self.docker_hub_api = trim_base(url.into());
        self
    }

    /// Sets the GCR API base.
    #[must_use]
    pub fn with_gcr_api(mut self, url: impl Into<String>) -> Self {
        self.gcr_api = trim_base(url.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Checks that both API bases are absolute HTTP(S) URLs.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidUrl`] for the first bad base URL.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for base in [&self.docker_hub_api, &self.gcr_api] {
            let url = Url::parse(base).map_err(|e| RegistryError::InvalidUrl {
                url: base.clone(),
                reason: e.to_string(),
            })?;

            if !matches!(url.scheme(), "http" | "https") {
                return Err(RegistryError::InvalidUrl {
                    url: base.clone(),
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
        }
        Ok(())
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = RegistryConfig::new();
        assert_eq!(config.docker_hub_api, "https://hub.docker.com/v2/repositories");
        assert_eq!(config.gcr_api, "https://gcr.io/v2");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("tagcheck/"));
    }

    #[test]
    fn test_builders_trim_trailing_slashes() {
        let config = RegistryConfig::new()
            .with_docker_hub_api("http://127.0.0.1:9000/hub//")
            .with_gcr_api("http://127.0.0.1:9000/v2/");
        assert_eq!(config.docker_hub_api, "http://127.0.0.1:9000/hub");
        assert_eq!(config.gcr_api, "http://127.0.0.1:9000/v2");
    }

    #[test]
    fn test_with_timeout() {
        let config = RegistryConfig::new().with_timeout(Duration::from_millis(250));
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_validate_defaults() {
        assert!(RegistryConfig::new().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_relative_url() {
        let err = RegistryConfig::new()
            .with_gcr_api("gcr.io/v2")
            .validate()
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidUrl { url, .. } if url == "gcr.io/v2"));
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let err = RegistryConfig::new()
            .with_docker_hub_api("ftp://hub.docker.com/v2/repositories")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }
}
