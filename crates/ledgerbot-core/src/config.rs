//! Bot configuration
//!
//! All knobs have compiled-in defaults; an optional TOML file overrides them.
//! A missing file means defaults, a malformed file is an error (silent
//! fallback would hide typos in threshold values).

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Runtime configuration for advice thresholds, menu presets, and the
/// external dashboard link.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Category names eligible for the "reduce spending" recommendation.
    /// Matched case-insensitively.
    pub discretionary_categories: Vec<String>,
    /// A discretionary category total above this triggers the category
    /// recommendation (strictly greater).
    pub category_threshold: Decimal,
    /// Total monthly expenses above this mean spending is too high.
    pub high_threshold: Decimal,
    /// Total monthly expenses above this mean spending is moderate.
    pub moderate_threshold: Decimal,
    /// Category buttons offered when recording an expense.
    pub preset_categories: Vec<String>,
    /// Payment-method buttons offered when recording an expense.
    pub preset_payment_methods: Vec<String>,
    /// Base URL for the external reporting dashboard.
    pub dashboard_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discretionary_categories: vec![
                "leisure".to_string(),
                "shopping".to_string(),
                "entertainment".to_string(),
            ],
            category_threshold: Decimal::from(1000),
            high_threshold: Decimal::from(3000),
            moderate_threshold: Decimal::from(1500),
            preset_categories: vec![
                "food".to_string(),
                "transport".to_string(),
                "housing".to_string(),
                "health".to_string(),
                "leisure".to_string(),
                "shopping".to_string(),
                "entertainment".to_string(),
            ],
            preset_payment_methods: vec![
                "cash".to_string(),
                "debit card".to_string(),
                "credit card".to_string(),
                "transfer".to_string(),
            ],
            dashboard_base_url: "https://dash.ledgerbot.example".to_string(),
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults when no file is given
    /// or the given path does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Case-insensitive membership test against the discretionary set.
    pub fn is_discretionary(&self, category: &str) -> bool {
        let lowered = category.to_lowercase();
        self.discretionary_categories
            .iter()
            .any(|c| c.to_lowercase() == lowered)
    }
}
