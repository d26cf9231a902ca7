//! Ledgerbot CLI - conversational expense and income tracker
//!
//! Usage:
//!   ledgerbot init                          Initialize database
//!   ledgerbot serve --port 3000             Start the webhook server
//!   ledgerbot summary --user alice          Print this month's summary
//!   ledgerbot export --user alice           Write this month's CSV report
//!   ledgerbot set-limit --user alice 1500   Set a monthly budget limit

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
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Serve { port, host } => {
            commands::cmd_serve(&cli.db, cli.config.as_deref(), &host, port).await
        }
        Commands::Summary { user, month, year } => {
            let db = commands::open_db(&cli.db)?;
            let config = ledgerbot_core::config::Config::load(cli.config.as_deref())?;
            let (month, year) = commands::resolve_period(month, year)?;
            commands::cmd_summary(&db, &config, &user, month, year)
        }
        Commands::Export {
            user,
            month,
            year,
            output,
        } => {
            let db = commands::open_db(&cli.db)?;
            let (month, year) = commands::resolve_period(month, year)?;
            commands::cmd_export(&db, &user, month, year, output)
        }
        Commands::SetLimit { user, amount } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_set_limit(&db, &user, &amount)
        }
    }
}
