//! Server command implementation

use std::path::Path;

use anyhow::Result;

use ledgerbot_core::config::Config;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    config_path: Option<&Path>,
    host: &str,
    port: u16,
) -> Result<()> {
    println!("🚀 Starting ledgerbot webhook server...");
    println!("   Database: {}", db_path.display());
    if let Some(path) = config_path {
        println!("   Config: {}", path.display());
    }
    println!("   Listening: http://{}:{}", host, port);
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path)?;
    let config = Config::load(config_path)?;

    ledgerbot_server::serve(db, config, host, port).await?;

    Ok(())
}
