//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ledgerbot - conversational expense and income tracker
#[derive(Parser)]
#[command(name = "ledgerbot")]
#[command(about = "Conversational expense and income tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "ledgerbot.db", global = true)]
    pub db: PathBuf,

    /// Config file (TOML); compiled-in defaults are used when omitted
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
    /// Initialize the database
    Init,

    /// Start the webhook server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Print a user's monthly summary and recommendation
    Summary {
        /// Chat user identity
        #[arg(short, long)]
        user: String,

        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to the current year)
        #[arg(short = 'y', long)]
        year: Option<i32>,
    },

    /// Write a user's monthly CSV report
    Export {
        /// Chat user identity
        #[arg(short, long)]
        user: String,

        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (defaults to the current year)
        #[arg(short = 'y', long)]
        year: Option<i32>,

        /// Output file (defaults to ledgerbot-<user>-<year>-<month>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Set a user's monthly budget limit
    SetLimit {
        /// Chat user identity
        #[arg(short, long)]
        user: String,

        /// Limit amount, e.g. 1500 or 1500.50
        amount: String,
    },
}
