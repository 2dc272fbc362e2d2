//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - One analysis pass over a CSV file (report, JSON, charts)
//! - `config` - Show the active configuration
//! - `serve` - Web server command

pub mod analyze;
pub mod config;
pub mod serve;

// Re-export command functions for main.rs
pub use analyze::*;
pub use config::*;
pub use serve::*;

use std::path::Path;

use anyhow::{Context, Result};
use monthcast_core::{Config, ConfigSource};
use tracing::debug;

/// Load configuration, honoring an explicit `--config` path
pub fn load_config(path: Option<&Path>) -> Result<(Config, ConfigSource)> {
    let (config, source) = Config::load(path).context("Failed to load configuration")?;
    debug!(source = %source, "Loaded configuration");
    Ok((config, source))
}
