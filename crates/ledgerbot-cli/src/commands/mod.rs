//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_db, resolve_period) and init
//! - `limits` - Budget limit command
//! - `reports` - Summary and export commands
//! - `serve` - Webhook server command

pub mod core;
pub mod limits;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use core::*;
pub use limits::*;
pub use reports::*;
pub use serve::*;
