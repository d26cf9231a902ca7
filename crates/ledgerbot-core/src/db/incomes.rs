//! Income operations

use rusqlite::params;

use super::{month_window, parse_amount, parse_date, Database};
use crate::error::{Error, Result};
use crate::models::{IncomePatch, IncomeRecord, NewIncome};

impl Database {
    /// Insert an income, returning the new row id
    pub fn add_income(&self, new: &NewIncome) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO incomes (user, amount, description, date)
            VALUES (?, ?, ?, ?)
            "#,
            params![
                new.user,
                new.amount.to_string(),
                new.description,
                new.date.to_string(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List a user's incomes, optionally narrowed to one month
    pub fn list_incomes(
        &self,
        user: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Vec<IncomeRecord>> {
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
            SELECT id, user, amount, description, date
            FROM incomes
            WHERE {}
            ORDER BY date, id
            "#,
            conditions.join(" AND ")
        );

        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(param_refs.as_slice(), |row| {
            Ok(IncomeRecord {
                id: row.get(0)?,
                user: row.get(1)?,
                amount: parse_amount(2, row.get(2)?)?,
                description: row.get(3)?,
                date: parse_date(4, row.get(4)?)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Update only the supplied fields of one income
    pub fn edit_income(&self, user: &str, id: i64, patch: &IncomePatch) -> Result<()> {
        let conn = self.conn()?;

        if patch.is_empty() {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM incomes WHERE user = ? AND id = ?)",
                params![user, id],
                |row| row.get(0),
            )?;
            if exists {
                return Ok(());
            }
            return Err(Error::NotFound(format!("income {}", id)));
        }

        let mut sets = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(amount) = patch.amount {
            sets.push("amount = ?");
            params.push(Box::new(amount.to_string()));
        }
        if let Some(ref description) = patch.description {
            sets.push("description = ?");
            params.push(Box::new(description.clone()));
        }

        params.push(Box::new(user.to_string()));
        params.push(Box::new(id));

        let sql = format!(
            "UPDATE incomes SET {} WHERE user = ? AND id = ?",
            sets.join(", ")
        );
        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
        let affected = conn.execute(&sql, param_refs.as_slice())?;

        if affected == 0 {
            return Err(Error::NotFound(format!("income {}", id)));
        }
        Ok(())
    }

    /// Delete one income owned by the user
    pub fn remove_income(&self, user: &str, id: i64) -> Result<()> {
        let conn = self.conn()?;

        let affected = conn.execute(
            "DELETE FROM incomes WHERE user = ? AND id = ?",
            params![user, id],
        )?;

        if affected == 0 {
            return Err(Error::NotFound(format!("income {}", id)));
        }
        Ok(())
    }
}
