//! Monthcast CLI - Income and expense forecaster
//!
//! Usage:
//!   monthcast analyze --file CSV            Print insights and next-month forecast
//!   monthcast analyze --file CSV --json     Same, as JSON
//!   monthcast analyze --file CSV --charts D Also write trend charts to D
//!   monthcast serve --port 3000             Start web UI
//!   monthcast config                        Show active configuration

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Analyze { file, json, charts } => {
            commands::cmd_analyze(config_path, &file, json, charts.as_deref())
        }
        Commands::Serve { port, host } => commands::cmd_serve(config_path, &host, port).await,
        Commands::Config => commands::cmd_config(config_path),
    }
}
