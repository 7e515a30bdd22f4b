//! Scan command implementation.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;

use tagcheck_core::ImageInventory;
use tagcheck_scan::{DocWalker, Extractor};

use super::{DocsArgs, OutputFormat};
use crate::reporter::{ConsoleReporter, JsonReporter, Reporter};

/// Arguments for the scan command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub docs: DocsArgs,
}

/// Runs the scan command.
pub fn run(args: &ScanArgs) -> Result<()> {
    let stdout = io::stdout().lock();
    execute(&args.docs, stdout).map(|_| ())
}

/// Lists the references found under the docs root without contacting any
/// registry.
///
/// # Errors
///
/// Returns an error if the tree cannot be scanned or output cannot be written.
pub fn execute<W: Write>(docs: &DocsArgs, out: W) -> Result<ImageInventory> {
    let root = &docs.root;
    let files = DocWalker::with_config(docs.walk_config())
        .walk(root)
        .with_context(|| format!("Failed to scan documentation in {}", root.display()))?;
    let inventory = Extractor::new()
        .scan_files(root, &files)
        .context("Failed to extract image references")?;

    match docs.format {
        OutputFormat::Text => {
            ConsoleReporter::new(out).inventory(files.len(), &inventory)?;
        }
        OutputFormat::Json => {
            JsonReporter::new(out).inventory_only(&inventory)?;
        }
    }

    Ok(inventory)
}
