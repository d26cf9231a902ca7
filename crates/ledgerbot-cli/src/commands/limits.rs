//! Budget limit command

use std::str::FromStr;

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;

use ledgerbot_core::db::Database;
use ledgerbot_core::models::money;

pub fn cmd_set_limit(db: &Database, user: &str, amount: &str) -> Result<()> {
    // Accept a comma decimal separator like the chat flows do
    let normalized = amount.trim().replace(',', ".");
    let amount = Decimal::from_str(&normalized)
        .with_context(|| format!("Invalid amount: {}", normalized))?;
    if amount <= Decimal::ZERO {
        bail!("Limit must be positive");
    }

    db.set_limit(user, amount).context("Failed to set limit")?;

    println!("✅ Budget limit for {} set to {}", user, money(amount));

    Ok(())
}
