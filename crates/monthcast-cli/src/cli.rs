//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Monthcast - Forecast next month's income and expenses
#[derive(Parser)]
#[command(name = "monthcast")]
#[command(about = "Trend-based income and expense forecaster", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the user config dir, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a monthly income/expense CSV and forecast the next month
    Analyze {
        /// CSV file with period, income and expense columns
        #[arg(short, long)]
        file: PathBuf,

        /// Print the full analysis as JSON instead of a report
        #[arg(long)]
        json: bool,

        /// Write expense and income trend charts (SVG) into this directory
        #[arg(long)]
        charts: Option<PathBuf>,
    },

    /// Start the web UI
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Show the active configuration and where it was loaded from
    Config,
}
