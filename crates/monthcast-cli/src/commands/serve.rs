//! Server command implementation

use std::path::Path;

use anyhow::Result;

use super::load_config;

pub async fn cmd_serve(config_path: Option<&Path>, host: &str, port: u16) -> Result<()> {
    let (config, source) = load_config(config_path)?;

    println!("🚀 Starting Monthcast web UI...");
    println!("   Config: {}", source);
    println!("   Listening: http://{}:{}", host, port);
    if host != "127.0.0.1" && host != "localhost" {
        println!();
        println!("   ⚠️  Uploads are not authenticated - do not expose to untrusted networks!");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    monthcast_server::serve(config, host, port).await
}
