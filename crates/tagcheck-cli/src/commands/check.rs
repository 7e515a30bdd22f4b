//! Check command implementation.

use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use tagcheck_registry::{RegistryClient, RegistryConfig};
use tagcheck_scan::{DocWalker, Extractor, WalkConfig};

use super::{DocsArgs, OutputFormat};
use crate::reporter::{CheckReport, ConsoleReporter, JsonReporter, Outcome, Reporter};

/// Pause between consecutive registry requests.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub docs: DocsArgs,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = 10_000, env = "TAGCHECK_TIMEOUT_MS")]
    pub timeout_ms: u64,

    /// Delay between registry requests in milliseconds
    #[arg(long, default_value_t = 100, env = "TAGCHECK_DELAY_MS")]
    pub delay_ms: u64,

    /// Docker Hub repository API base URL
    #[arg(long, env = "TAGCHECK_DOCKER_HUB_API")]
    pub docker_hub_api: Option<String>,

    /// GCR V2 API base URL
    #[arg(long, env = "TAGCHECK_GCR_API")]
    pub gcr_api: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CheckArgs {
    fn registry_config(&self) -> RegistryConfig {
        let mut config =
            RegistryConfig::new().with_timeout(Duration::from_millis(self.timeout_ms));

        if let Some(url) = &self.docker_hub_api {
            config = config.with_docker_hub_api(url.as_str());
        }
        if let Some(url) = &self.gcr_api {
            config = config.with_gcr_api(url.as_str());
        }
        config
    }
}

/// Options controlling the validation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    /// Pause between consecutive requests.
    pub delay: Duration,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
        }
    }
}

impl CheckOptions {
    /// Sets the inter-request delay.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Runs the check command.
pub async fn run(args: &CheckArgs) -> Result<Outcome> {
    let client =
        RegistryClient::new(args.registry_config()).context("Invalid registry configuration")?;
    let options = CheckOptions::default().with_delay(Duration::from_millis(args.delay_ms));
    let walk_config = args.docs.walk_config();

    let report = match args.docs.format {
        OutputFormat::Text => {
            let colors = !args.no_color && io::stdout().is_terminal();
            let mut reporter = ConsoleReporter::stdout().with_colors(colors);
            execute(&args.docs.root, walk_config, &client, options, &mut reporter).await?
        }
        OutputFormat::Json => {
            let mut reporter = JsonReporter::stdout();
            execute(&args.docs.root, walk_config, &client, options, &mut reporter).await?
        }
    };

    Ok(report.outcome())
}

/// Scans `root` and validates every reference found, one request at a time.
///
/// # Errors
///
/// Returns an error if the tree cannot be scanned or the reporter cannot
/// write. Registry failures are recorded per reference and never abort.
pub async fn execute<R: Reporter>(
    root: &Path,
    walk_config: WalkConfig,
    client: &RegistryClient,
    options: CheckOptions,
    reporter: &mut R,
) -> Result<CheckReport> {
    let files = DocWalker::with_config(walk_config)
        .walk(root)
        .with_context(|| format!("Failed to scan documentation in {}", root.display()))?;
    let inventory = Extractor::new()
        .scan_files(root, &files)
        .context("Failed to extract image references")?;

    reporter.inventory(files.len(), &inventory)?;

    info!(images = inventory.len(), "Validating images");

    let mut results = Vec::with_capacity(inventory.len());
    for (index, reference) in inventory.references().enumerate() {
        if index > 0 && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }

        reporter.checking(reference)?;
        let result = client.validate(reference).await;
        reporter.checked(&result)?;
        results.push(result);
    }

    let report = CheckReport::new(files.len(), inventory, results);
    info!(
        valid = report.valid(),
        invalid = report.invalid(),
        errored = report.errored(),
        "Validation complete"
    );

    reporter.summary(&report)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use tagcheck_registry::ValidationStatus;
    use tempfile::TempDir;
    use wiremock::matchers::path;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RegistryClient {
        let config = RegistryConfig::new()
            .with_docker_hub_api(format!("{}/v2/repositories", server.uri()))
            .with_gcr_api(format!("{}/v2", server.uri()))
            .with_timeout(Duration::from_secs(5));
        RegistryClient::new(config).unwrap()
    }

    fn docs_with(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("install.md"), content).unwrap();
        dir
    }

    fn no_delay() -> CheckOptions {
        CheckOptions::default().with_delay(Duration::ZERO)
    }

    #[test]
    fn test_registry_config_from_args() {
        let args = CheckArgs {
            docs: DocsArgs {
                root: "docs".into(),
                exclude_dirs: Vec::new(),
                format: OutputFormat::Text,
            },
            timeout_ms: 250,
            delay_ms: 0,
            docker_hub_api: Some("http://127.0.0.1:9000/hub/".to_string()),
            gcr_api: None,
            no_color: false,
        };

        let config = args.registry_config();
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.docker_hub_api, "http://127.0.0.1:9000/hub");
        assert_eq!(config.gcr_api, "https://gcr.io/v2");
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(CheckOptions::default().delay, Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_execute_mixed_results() {
        let server = MockServer::start().await;
        Mock::given(path("/v2/repositories/minaprotocol/good/tags/1.0"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/v2/repositories/minaprotocol/bad/tags/2.0"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let docs = docs_with("docker pull minaprotocol/good:1.0\ndocker pull minaprotocol/bad:2.0\n");
        let mut reporter = ConsoleReporter::new(Vec::new()).with_colors(false);

        let report = execute(
            docs.path(),
            WalkConfig::new(),
            &client_for(&server),
            no_delay(),
            &mut reporter,
        )
        .await
        .unwrap();

        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.valid(), 1);
        assert_eq!(report.invalid(), 1);
        assert_eq!(report.outcome(), Outcome::Invalid);

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(output.contains("Checking minaprotocol/bad:2.0... ✗ NOT FOUND (404)"));
        assert!(output.contains("Checking minaprotocol/good:1.0... ✓ EXISTS"));
        assert!(output.contains("INVALID IMAGES:"));
    }

    #[tokio::test]
    async fn test_execute_results_follow_reference_order() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let docs = docs_with("image: 'zookeeper:3'\nimage: 'alpine:3'\nimage: 'redis:7'\n");
        let mut reporter = JsonReporter::new(Vec::new());

        let report = execute(
            docs.path(),
            WalkConfig::new(),
            &client_for(&server),
            no_delay(),
            &mut reporter,
        )
        .await
        .unwrap();

        let checked: Vec<&str> = report.results.iter().map(|r| r.reference.as_str()).collect();
        assert_eq!(checked, ["alpine:3", "redis:7", "zookeeper:3"]);
        assert_eq!(report.outcome(), Outcome::AllValid);
    }

    #[tokio::test]
    async fn test_execute_transport_errors_do_not_abort() {
        let config = RegistryConfig::new()
            .with_docker_hub_api("http://127.0.0.1:1/v2/repositories")
            .with_gcr_api("http://127.0.0.1:1/v2")
            .with_timeout(Duration::from_secs(2));
        let client = RegistryClient::new(config).unwrap();

        let docs = docs_with("minaprotocol/one:1.0 and gcr.io/proj/two:2.0");
        let mut reporter = ConsoleReporter::new(Vec::new()).with_colors(false);

        let report = execute(docs.path(), WalkConfig::new(), &client, no_delay(), &mut reporter)
            .await
            .unwrap();

        assert_eq!(report.results.len(), 2);
        assert!(report
            .results
            .iter()
            .all(|r| r.status() == ValidationStatus::Errored));
        assert_eq!(report.outcome(), Outcome::Unconfirmed);

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(output.contains("some had validation errors"));
    }

    #[tokio::test]
    async fn test_execute_empty_tree() {
        let server = MockServer::start().await;
        let docs = TempDir::new().unwrap();
        let mut reporter = ConsoleReporter::new(Vec::new()).with_colors(false);

        let report = execute(
            docs.path(),
            WalkConfig::new(),
            &client_for(&server),
            no_delay(),
            &mut reporter,
        )
        .await
        .unwrap();

        assert!(report.results.is_empty());
        assert_eq!(report.outcome(), Outcome::AllValid);
    }

    #[tokio::test]
    async fn test_execute_missing_root_is_fatal() {
        let server = MockServer::start().await;
        let docs = TempDir::new().unwrap();
        let missing = docs.path().join("nope");
        let mut reporter = ConsoleReporter::new(Vec::new()).with_colors(false);

        let err = execute(
            &missing,
            WalkConfig::new(),
            &client_for(&server),
            no_delay(),
            &mut reporter,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Failed to scan documentation"));
    }
}
