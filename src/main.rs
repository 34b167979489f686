//! Blogcast CLI entry point.

use anyhow::Result;
use blogcast::cli::{commands, Cli, Commands};
use blogcast::config::Settings;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_ref().map(std::path::PathBuf::from);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| settings.log_directive(cli.verbose)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
    let credentials = cli.keys.credentials();

    match &cli.command {
        Commands::Generate { url, play, output } => {
            commands::run_generate(url, *play, output.clone(), &credentials, &settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port, credentials, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&credentials, &settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, config_path.as_deref(), settings)?;
        }
    }

    Ok(())
}
