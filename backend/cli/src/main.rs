mod check_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use medrelay_config::{config_file_from_env, ConfigOverlay};
use medrelay_gateway::{start_server, GatewayState};
use medrelay_logging::init_logger;

#[derive(Parser)]
#[command(name = "medrelay")]
#[command(about = "medrelay: relay gateway for the disease prediction service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway HTTP server
    Serve {
        /// YAML config file (defaults to $MEDRELAY_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Mount the OCR `/extract` route
        #[arg(long)]
        enable_extract: bool,
    },
    /// Validate and print the effective configuration
    Check {
        /// YAML config file (defaults to $MEDRELAY_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            port,
            enable_extract,
        } => {
            let overlay = ConfigOverlay {
                listen_port: port,
                enable_extract_route: enable_extract.then_some(true),
                ..Default::default()
            };
            run_server(config.or_else(config_file_from_env), overlay).await?;
        }
        Commands::Check { config } => {
            init_logger(None, "warn");
            check_cmd::run(config.or_else(config_file_from_env).as_deref()).await?;
        }
    }

    Ok(())
}

async fn run_server(config_file: Option<PathBuf>, overlay: ConfigOverlay) -> Result<()> {
    let config = medrelay_config::load(config_file.as_deref(), overlay).await?;
    init_logger(config.log_dir.as_deref(), &config.log_level);
    medrelay_config::ensure_valid(&config)?;

    info!(
        port = config.listen_port,
        extract_enabled = config.enable_extract_route,
        "Starting medrelay"
    );

    let state = GatewayState::from_config(config)?;
    start_server(state, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
