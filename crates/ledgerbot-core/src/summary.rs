//! Monthly aggregation
//!
//! Sums a user's records for one `(month, year)` window. Accumulation happens
//! in `Decimal`, so many small amounts never drift; rounding to two digits is
//! a presentation concern (`models::money`).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::Database;
use crate::error::Result;

/// Per-category and total sums for one user-month
#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    /// (category, total) pairs, sorted by category name. Categories with no
    /// matching records are omitted. The sorted order is part of the
    /// contract: it keeps the first-match recommendation rule deterministic.
    pub categories: Vec<(String, Decimal)>,
    pub total_expenses: Decimal,
    pub total_incomes: Decimal,
    /// incomes minus expenses
    pub balance: Decimal,
}

impl MonthlySummary {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.total_incomes == Decimal::ZERO
    }
}

/// Aggregate one user's month
pub fn monthly_summary(
    db: &Database,
    user: &str,
    month: u32,
    year: i32,
) -> Result<MonthlySummary> {
    let expenses = db.list_expenses(user, Some(month), Some(year))?;
    let incomes = db.list_incomes(user, Some(month), Some(year))?;

    let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total_expenses = Decimal::ZERO;
    for expense in &expenses {
        *by_category.entry(expense.category.clone()).or_default() += expense.amount;
        total_expenses += expense.amount;
    }

    let total_incomes: Decimal = incomes.iter().map(|i| i.amount).sum();

    Ok(MonthlySummary {
        month,
        year,
        categories: by_category.into_iter().collect(),
        total_expenses,
        total_incomes,
        balance: total_incomes - total_expenses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, NewExpense, NewIncome};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn seed_expense(db: &Database, user: &str, amount: Decimal, category: &str, day: u32) {
        db.add_expense(&NewExpense {
            user: user.to_string(),
            amount,
            category: category.to_string(),
            payment_method: None,
            kind: Frequency::Regular,
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
        })
        .unwrap();
    }

    #[test]
    fn test_summary_groups_and_sorts_categories() {
        let db = Database::in_memory().unwrap();
        seed_expense(&db, "u1", dec!(30), "transport", 2);
        seed_expense(&db, "u1", dec!(10), "food", 1);
        seed_expense(&db, "u1", dec!(5.50), "food", 20);

        let summary = monthly_summary(&db, "u1", 6, 2025).unwrap();
        assert_eq!(
            summary.categories,
            vec![
                ("food".to_string(), dec!(15.50)),
                ("transport".to_string(), dec!(30)),
            ]
        );
        assert_eq!(summary.total_expenses, dec!(45.50));
    }

    #[test]
    fn test_summary_balance() {
        let db = Database::in_memory().unwrap();
        seed_expense(&db, "u1", dec!(550), "food", 3);
        db.add_income(&NewIncome {
            user: "u1".to_string(),
            amount: dec!(2000),
            description: "salary".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        })
        .unwrap();

        let summary = monthly_summary(&db, "u1", 6, 2025).unwrap();
        assert_eq!(summary.total_incomes, dec!(2000));
        assert_eq!(summary.balance, dec!(1450));
    }

    #[test]
    fn test_summary_omits_other_windows_and_users() {
        let db = Database::in_memory().unwrap();
        seed_expense(&db, "u1", dec!(10), "food", 1);
        seed_expense(&db, "other", dec!(999), "food", 1);

        let may = monthly_summary(&db, "u1", 5, 2025).unwrap();
        assert!(may.is_empty());
        assert_eq!(may.balance, Decimal::ZERO);

        let june = monthly_summary(&db, "u1", 6, 2025).unwrap();
        assert_eq!(june.total_expenses, dec!(10));
    }

    #[test]
    fn test_summary_keeps_cent_precision() {
        let db = Database::in_memory().unwrap();
        // 100 x 0.10 must be exactly 10, not 9.99999...
        for _ in 0..100 {
            seed_expense(&db, "u1", dec!(0.10), "coffee", 15);
        }
        let summary = monthly_summary(&db, "u1", 6, 2025).unwrap();
        assert_eq!(summary.total_expenses, dec!(10.00));
    }
}
