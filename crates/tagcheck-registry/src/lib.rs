//! # Tagcheck Registry
//!
//! Existence checks for container images on their public registries.
//!
//! Two registries are supported, each through its anonymous read API:
//!
//! - **Docker Hub**: `GET <hub-api>/<namespace>/<name>/tags/<tag>`
//! - **GCR**: `GET <gcr-api>/<project>/<image>/manifests/<tag>` (Docker Registry HTTP API V2)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tagcheck_core::ImageReference;
//! use tagcheck_registry::{RegistryClient, RegistryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RegistryClient::new(RegistryConfig::default())?;
//!
//!     let reference = ImageReference::new("minaprotocol/mina-daemon:3.0.3-bullseye-mainnet")?;
//!     let result = client.validate(&reference).await;
//!
//!     println!("{reference}: {:?}", result.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Outcomes
//!
//! A lookup never fails as a whole. Every reference produces a
//! [`ValidationResult`] that is either a definitive answer from the registry
//! (with its HTTP status) or a transport error (timeout, DNS, refused
//! connection) recorded as a message.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod client;
mod config;
mod error;
mod result;

pub use client::{RegistryClient, GCR_MANIFEST_MEDIA_TYPE};
pub use config::{RegistryConfig, DEFAULT_DOCKER_HUB_API, DEFAULT_GCR_API, DEFAULT_TIMEOUT};
pub use error::RegistryError;
pub use result::{ValidationResult, ValidationStatus};
