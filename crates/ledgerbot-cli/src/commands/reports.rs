//! Summary and export commands

use std::path::PathBuf;

use anyhow::{Context, Result};

use ledgerbot_core::config::Config;
use ledgerbot_core::db::Database;
use ledgerbot_core::models::money;
use ledgerbot_core::{advice, report, summary};

pub fn cmd_summary(
    db: &Database,
    config: &Config,
    user: &str,
    month: u32,
    year: i32,
) -> Result<()> {
    let summary = summary::monthly_summary(db, user, month, year)
        .context("Failed to build monthly summary")?;

    println!("📊 Summary for {} ({:02}/{})", user, month, year);

    if summary.is_empty() {
        println!("   No records this month");
        return Ok(());
    }

    for (category, total) in &summary.categories {
        println!("   {:<20} {:>12}", category, money(*total));
    }
    println!();
    println!("   {:<20} {:>12}", "Total expenses", money(summary.total_expenses));
    println!("   {:<20} {:>12}", "Total incomes", money(summary.total_incomes));
    println!("   {:<20} {:>12}", "Balance", money(summary.balance));
    println!();
    println!("💡 {}", advice::recommendation(config, &summary));

    Ok(())
}

pub fn cmd_export(
    db: &Database,
    user: &str,
    month: u32,
    year: i32,
    output: Option<PathBuf>,
) -> Result<()> {
    let path =
        output.unwrap_or_else(|| PathBuf::from(report::report_file_name(user, month, year)));

    let summary = report::write_monthly_report(db, user, month, year, &path)
        .context("Failed to write report")?;

    if summary.is_empty() {
        println!("⚠️  No records for {:02}/{}; wrote an empty report", month, year);
    }
    println!("✅ Report written to {}", path.display());

    Ok(())
}
