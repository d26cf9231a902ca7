//! Monthly CSV report rendering
//!
//! Produces the downloadable document for one `(user, month, year)` window:
//! expense rows, income rows, category totals, grand totals, and the balance.

use std::path::Path;

use tracing::info;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::money;
use crate::summary::{monthly_summary, MonthlySummary};

/// Render the monthly report to a CSV file at `output`.
///
/// Returns the summary it was built from so callers can reuse the aggregates
/// without a second pass over the store.
pub fn write_monthly_report(
    db: &Database,
    user: &str,
    month: u32,
    year: i32,
    output: &Path,
) -> Result<MonthlySummary> {
    let expenses = db.list_expenses(user, Some(month), Some(year))?;
    let incomes = db.list_incomes(user, Some(month), Some(year))?;
    let summary = monthly_summary(db, user, month, year)?;

    let mut writer = csv::Writer::from_path(output)?;

    writer.write_record(["section", "id", "date", "detail", "payment", "kind", "amount"])?;

    for e in &expenses {
        writer.write_record([
            "expense",
            &e.id.to_string(),
            &e.date.to_string(),
            &e.category,
            e.payment_method.as_deref().unwrap_or(""),
            e.kind.as_str(),
            &money(e.amount),
        ])?;
    }

    for i in &incomes {
        writer.write_record([
            "income",
            &i.id.to_string(),
            &i.date.to_string(),
            &i.description,
            "",
            "",
            &money(i.amount),
        ])?;
    }

    for (category, total) in &summary.categories {
        writer.write_record(["category_total", "", "", category, "", "", &money(*total)])?;
    }

    writer.write_record(["total_expenses", "", "", "", "", "", &money(summary.total_expenses)])?;
    writer.write_record(["total_incomes", "", "", "", "", "", &money(summary.total_incomes)])?;
    writer.write_record(["balance", "", "", "", "", "", &money(summary.balance)])?;

    writer
        .flush()
        .map_err(|e| Error::Render(format!("flushing report: {}", e)))?;

    info!(
        user,
        month,
        year,
        path = %output.display(),
        expenses = expenses.len(),
        incomes = incomes.len(),
        "Monthly report written"
    );
    Ok(summary)
}

/// Default file name for a month's report
pub fn report_file_name(user: &str, month: u32, year: i32) -> String {
    format!("ledgerbot-{}-{:04}-{:02}.csv", user, year, month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, NewExpense, NewIncome};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_report_contains_rows_and_totals() {
        let db = Database::in_memory().unwrap();
        db.add_expense(&NewExpense {
            user: "u1".to_string(),
            amount: dec!(550),
            category: "food".to_string(),
            payment_method: Some("cash".to_string()),
            kind: Frequency::Regular,
            date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
        })
        .unwrap();
        db.add_income(&NewIncome {
            user: "u1".to_string(),
            amount: dec!(2000),
            description: "salary".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        })
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(report_file_name("u1", 6, 2025));
        let summary = write_monthly_report(&db, "u1", 6, 2025, &path).unwrap();
        assert_eq!(summary.balance, dec!(1450));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("expense"), "{}", contents);
        assert!(contents.contains("food"), "{}", contents);
        assert!(contents.contains("salary"), "{}", contents);
        assert!(contents.contains("550.00"), "{}", contents);
        assert!(contents.contains("balance"), "{}", contents);
        assert!(contents.contains("1450.00"), "{}", contents);
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name("u1", 3, 2025), "ledgerbot-u1-2025-03.csv");
    }

    #[test]
    fn test_report_to_bad_path_is_an_error() {
        let db = Database::in_memory().unwrap();
        let path = Path::new("/nonexistent-dir/report.csv");
        assert!(write_monthly_report(&db, "u1", 6, 2025, path).is_err());
    }
}
