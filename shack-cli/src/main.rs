mod cli;
mod handler;

use clap::Parser;
use shack_core::config::AppConfig;
use shack_core::logging;

use cli::Cli;
use handler::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::from_file(&cli.config)?;

    // Initialize logging
    let _logging_guard = logging::init_logging(&config.log_dir, "shackbook", cli.log_level(&config.log_level))?;

    tracing::info!("shackbook {} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Configuration loaded from {}", cli.config.display());

    let session = Session::new(config)?;
    handler::run(cli.command, session).await
}
