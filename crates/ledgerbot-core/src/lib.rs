//! ledgerbot-core - Core library for the ledgerbot expense tracker
//!
//! This crate provides:
//! - SQLite ledger storage scoped by chat identity (`db`)
//! - Monthly per-category aggregation (`summary`)
//! - Recommendation rules and the budget monitor (`advice`)
//! - CSV report rendering (`report`)
//! - Dashboard link building (`dashboard`)
//! - TOML-backed runtime configuration (`config`)
//!
//! The conversation state machine that drives these lives in the
//! `ledgerbot-chat` crate; transports (webhook, CLI) sit on top of both.

pub mod advice;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod models;
pub mod report;
pub mod summary;

pub use error::{Error, Result};
