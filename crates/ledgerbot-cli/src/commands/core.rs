//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `resolve_period` - Month/year defaults and validation
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{ensure, Context, Result};
use chrono::{Datelike, Local};

use ledgerbot_core::db::Database;

/// Open the database, running migrations on first use
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

/// Fill in the current month/year where not given and validate the month
pub fn resolve_period(month: Option<u32>, year: Option<i32>) -> Result<(u32, i32)> {
    let now = Local::now().date_naive();
    let month = month.unwrap_or_else(|| now.month());
    let year = year.unwrap_or_else(|| now.year());
    ensure!((1..=12).contains(&month), "Month must be between 1 and 12");
    Ok((month, year))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized!");
    println!();
    println!("Next steps:");
    println!("  1. Start the webhook server: ledgerbot serve");
    println!("  2. Point your chat platform adapter at POST /update");

    Ok(())
}
