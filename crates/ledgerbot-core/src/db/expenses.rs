//! Expense operations
//!
//! Every statement is scoped by `(user, id)` or `(user, date window)`.
//! Editing or removing a row another user owns affects zero rows and is
//! reported as `NotFound`; callers cannot tell foreign ids from missing ones.

use rusqlite::params;

use super::{month_window, parse_amount, parse_date, Database};
use crate::error::{Error, Result};
use crate::models::{ExpensePatch, ExpenseRecord, NewExpense};

impl Database {
    /// Insert an expense, returning the new row id
    pub fn add_expense(&self, new: &NewExpense) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO expenses (user, amount, category, payment_method, kind, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                new.user,
                new.amount.to_string(),
                new.category,
                new.payment_method,
                new.kind.as_str(),
                new.date.to_string(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List a user's expenses, optionally narrowed to one month
    ///
    /// Ordered by date then id so repeated listings are stable.
    pub fn list_expenses(
        &self,
        user: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;

        let mut conditions = vec!["user = ?".to_string()];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user.to_string())];

        if let (Some(month), Some(year)) = (month, year) {
            let (start, end) = month_window(month, year)
                .ok_or_else(|| Error::Validation(format!("invalid month {}/{}", month, year)))?;
            conditions.push("date >= ? AND date < ?".to_string());
            params.push(Box::new(start.to_string()));
            params.push(Box::new(end.to_string()));
        }

        let sql = format!(
            r#"
            SELECT id, user, amount, category, payment_method, kind, date
            FROM expenses
            WHERE {}
            ORDER BY date, id
            "#,
            conditions.join(" AND ")
        );

        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(param_refs.as_slice(), |row| {
            Ok(ExpenseRecord {
                id: row.get(0)?,
                user: row.get(1)?,
                amount: parse_amount(2, row.get(2)?)?,
                category: row.get(3)?,
                payment_method: row.get(4)?,
                kind: row
                    .get::<_, String>(5)?
                    .parse()
                    .unwrap_or_default(),
                date: parse_date(6, row.get(6)?)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Update only the supplied fields of one expense
    ///
    /// An empty patch is a successful no-op when the row exists. Zero rows
    /// affected means the id is missing or belongs to another user.
    pub fn edit_expense(&self, user: &str, id: i64, patch: &ExpensePatch) -> Result<()> {
        let conn = self.conn()?;

        if patch.is_empty() {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM expenses WHERE user = ? AND id = ?)",
                params![user, id],
                |row| row.get(0),
            )?;
            if exists {
                return Ok(());
            }
            return Err(Error::NotFound(format!("expense {}", id)));
        }

        let mut sets = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(amount) = patch.amount {
            sets.push("amount = ?");
            params.push(Box::new(amount.to_string()));
        }
        if let Some(ref category) = patch.category {
            sets.push("category = ?");
            params.push(Box::new(category.clone()));
        }
        if let Some(ref payment) = patch.payment_method {
            sets.push("payment_method = ?");
            params.push(Box::new(payment.clone()));
        }

        params.push(Box::new(user.to_string()));
        params.push(Box::new(id));

        let sql = format!(
            "UPDATE expenses SET {} WHERE user = ? AND id = ?",
            sets.join(", ")
        );
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let affected = conn.execute(&sql, param_refs.as_slice())?;

        if affected == 0 {
            return Err(Error::NotFound(format!("expense {}", id)));
        }
        Ok(())
    }

    /// Delete one expense owned by the user
    pub fn remove_expense(&self, user: &str, id: i64) -> Result<()> {
        let conn = self.conn()?;

        let affected = conn.execute(
            "DELETE FROM expenses WHERE user = ? AND id = ?",
            params![user, id],
        )?;

        if affected == 0 {
            return Err(Error::NotFound(format!("expense {}", id)));
        }
        Ok(())
    }
}
