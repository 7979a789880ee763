//! authorly server binary.
//!
//! Loads configuration, applies CLI overrides, and runs the HTTP server.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use authorly::config::AppConfig;
use authorly::http;

#[derive(Debug, Parser)]
#[command(name = "authorly", version, about = "Self-hostable author-profile service")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,

    /// Override the JSON data file (omit everywhere for in-memory)
    #[arg(long)]
    data: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            std::process::exit(1);
        }
    };

    // CLI flags win over both the config file and the environment
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data) = args.data {
        config.data_path = Some(data);
    }
    if let Err(err) = config.validate() {
        eprintln!("Configuration error: {err}");
        std::process::exit(1);
    }

    if let Err(err) = http::serve(config).await {
        eprintln!("Server error: {err}");
        std::process::exit(1);
    }
}
