//! apiprobe binary.

use std::process::ExitCode;

use apiprobe::{AppError, Cli};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the PASS/FAIL stream.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    tracing::info!("apiprobe v{}", env!("CARGO_PKG_VERSION"));

    match apiprobe::run(&cli).await {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(e) => {
            tracing::error!(error = %e, "run did not start");
            eprintln!("Error: {e}");
            ExitCode::from(AppError::EXIT_CODE)
        }
    }
}
