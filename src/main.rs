use anyhow::{Context, Result};
use career_client::cli::{handle_command, Cli};
use career_client::config::ClientConfig;
use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::{error, info};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Command failed: {:#}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::load(cli.config.as_deref(), cli.api_url.as_deref())?;
    init_logging(&config.log_file, cli.verbose)?;

    info!(
        "Starting Career Compass client v{} (environment: {})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );
    info!("API URL: {}", config.api_url);

    handle_command(cli, config).await
}

fn init_logging(log_file: &Path, verbose: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(Mutex::new(file))
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();

    Ok(())
}
