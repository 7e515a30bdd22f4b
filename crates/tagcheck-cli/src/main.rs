//! Tagcheck CLI - verifies container images referenced in documentation.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod reporter;

use commands::{Cli, Commands};

/// Exit status for scan, configuration and output failures.
const FATAL_EXIT: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so they never interleave with the report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tagcheck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => commands::check::run(&args).await.map(ExitCode::from),
        Commands::Scan(args) => commands::scan::run(&args).map(|()| ExitCode::SUCCESS),
        Commands::Version => {
            println!("tagcheck {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        ExitCode::from(FATAL_EXIT)
    })
}
