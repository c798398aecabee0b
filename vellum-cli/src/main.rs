//! Vellum command line interface

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tracing::info;

use vellum_config::domains::logging::{LogFormat, LoggingConfig};
use vellum_config::{ConfigLoader, VellumConfig};
use vellum_server::ServerServices;

#[derive(Parser)]
#[command(name = "vellum", version, about = "Vellum wiki upload service")]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Configuration utilities
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Check that the configuration loads and validates
    Validate,
    /// Print the default configuration as YAML
    Generate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => serve(cli.config.as_deref(), port).await,
        Commands::Config { action } => match action {
            ConfigAction::Validate => {
                let config = ConfigLoader::load(cli.config.as_deref())?;
                println!(
                    "Configuration OK ({} permission groups, uploads {})",
                    config.wiki.group_permissions.len(),
                    if config.wiki.enable_uploads { "enabled" } else { "disabled" }
                );
                Ok(())
            }
            ConfigAction::Generate => {
                print!("{}", serde_yaml::to_string(&VellumConfig::default())?);
                Ok(())
            }
        },
    }
}

async fn serve(config_path: Option<&Path>, port: Option<u16>) -> Result<()> {
    let mut config = ConfigLoader::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    init_tracing(&config.logging);

    let addr = config.server.socket_addr();
    let services = ServerServices::from_config(config);
    services.bootstrap().await?;

    let processor = services.processor.clone();
    tokio::spawn(async move { processor.start().await });

    let listener = TcpListener::bind(&addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, services.router()).await?;
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(logging.level.as_filter()));
    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
