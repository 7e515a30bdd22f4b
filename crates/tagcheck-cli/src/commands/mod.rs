//! CLI commands and argument parsing.

pub mod check;
pub mod scan;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tagcheck_scan::WalkConfig;

/// Tagcheck - verifies that container images referenced in documentation exist
#[derive(Parser)]
#[command(name = "tagcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Scan documentation and check every image against its registry
    Check(check::CheckArgs),

    /// List image references found in documentation without checking them
    Scan(scan::ScanArgs),

    /// Print version information
    Version,
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// A single JSON document
    Json,
}

/// Arguments shared by every command that reads a documentation tree.
#[derive(Args, Debug, Clone)]
pub struct DocsArgs {
    /// Documentation root directory
    #[arg(default_value = "docs", env = "TAGCHECK_DOCS_DIR")]
    pub root: PathBuf,

    /// Additional directory name to skip (repeatable)
    #[arg(long = "exclude-dir", value_name = "NAME")]
    pub exclude_dirs: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl DocsArgs {
    /// Walk configuration with the extra exclusions applied.
    pub fn walk_config(&self) -> WalkConfig {
        self.exclude_dirs
            .iter()
            .fold(WalkConfig::new(), |config, dir| config.exclude_dir(dir.as_str()))
    }
}
