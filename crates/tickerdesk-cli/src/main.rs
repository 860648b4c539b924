mod cli;
mod commands;
mod error;
mod output;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tickerdesk_core::{ApiClient, ApiConfig, ReqwestHttpClient};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    // Required process-wide configuration; absent or invalid is fatal here,
    // never recoverable later.
    let config = ApiConfig::from_env()?;
    tracing::debug!(base_url = config.base_url(), "configured");
    let client = ApiClient::new(config, Arc::new(ReqwestHttpClient::new()));

    commands::run(&cli, &client).await
}
