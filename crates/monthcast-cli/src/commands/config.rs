//! Config command implementation

use std::path::Path;

use anyhow::Result;

use super::load_config;

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let (config, source) = load_config(config_path)?;

    println!("⚙️  Monthcast configuration");
    println!("   Source: {}", source);
    if let Some(default_path) = monthcast_core::config::default_config_path() {
        println!("   User config path: {}", default_path.display());
    }
    println!();
    print!("{}", config.to_toml()?);

    Ok(())
}
