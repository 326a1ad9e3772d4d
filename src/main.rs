use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nsx_collector::config::{load_managers, Config, LoggingConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "nsx-collector",
    version,
    about = "Collects NSX Manager health and inventory metrics into InfluxDB",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Collector configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Manager inventory file
    #[arg(short, long, global = true, default_value = "managers.toml")]
    managers: PathBuf,

    /// Environment file loaded before anything else (default: ./.env if present)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect continuously until interrupted (default)
    Run,

    /// Run a single collection tick and print a summary
    Once,

    /// Validate configuration and credentials without network access
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load env file: {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    let config = Config::from_file(&cli.config)?;
    config.validate().context("Invalid configuration")?;

    setup_tracing(&config.logging, cli.verbose)?;

    let managers = load_managers(&cli.managers)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        managers = managers.len(),
        "nsx-collector starting"
    );

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run(config, managers).await?,
        Commands::Once => commands::once(config, managers).await?,
        Commands::Check => commands::check(&config, &managers)?,
    }

    Ok(())
}

fn setup_tracing(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(&logging.level))
            .with_context(|| format!("Invalid log level: {}", logging.level))?
    };

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    Ok(())
}
