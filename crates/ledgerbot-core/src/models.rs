//! Domain models for ledgerbot

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often an expense recurs
///
/// Stored as its own column. Fixed monthly expenses used to be encoded by
/// appending a marker to the category string; the explicit enum replaces
/// that substring matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// One-off expense
    #[default]
    Regular,
    /// Recurs every month (rent, subscriptions)
    Fixed,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Fixed => "fixed",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regular" => Ok(Self::Regular),
            "fixed" | "monthly" => Ok(Self::Fixed),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded expense, scoped to one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub user: String,
    pub amount: Decimal,
    pub category: String,
    pub payment_method: Option<String>,
    pub kind: Frequency,
    pub date: NaiveDate,
}

/// A recorded income, scoped to one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: i64,
    pub user: String,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
}

/// Fields for inserting an expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub user: String,
    pub amount: Decimal,
    pub category: String,
    pub payment_method: Option<String>,
    pub kind: Frequency,
    pub date: NaiveDate,
}

/// Fields for inserting an income
#[derive(Debug, Clone)]
pub struct NewIncome {
    pub user: String,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
}

/// Partial update for an expense
///
/// Only `Some` fields are written; `None` fields keep their stored value.
/// An all-`None` patch is a valid no-op that still fails with `NotFound`
/// when the target row does not exist for the user.
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.category.is_none() && self.payment_method.is_none()
    }
}

/// Partial update for an income
#[derive(Debug, Clone, Default)]
pub struct IncomePatch {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

impl IncomePatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.description.is_none()
    }
}

/// Format a money value with two fraction digits for presentation.
///
/// Internal arithmetic keeps full precision; rounding happens only here.
pub fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_frequency_round_trip() {
        assert_eq!("fixed".parse::<Frequency>().unwrap(), Frequency::Fixed);
        assert_eq!("Regular".parse::<Frequency>().unwrap(), Frequency::Regular);
        assert!("weekly".parse::<Frequency>().is_err());
        assert_eq!(Frequency::Fixed.to_string(), "fixed");
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(dec!(550)), "550.00");
        assert_eq!(money(dec!(12.346)), "12.35");
        assert_eq!(money(dec!(0.1) + dec!(0.2)), "0.30");
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ExpensePatch::default().is_empty());
        let patch = ExpensePatch {
            category: Some("food".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
