//! Budget limit operations

use rusqlite::{params, OptionalExtension};
use rust_decimal::Decimal;

use super::{parse_amount, Database};
use crate::error::Result;

impl Database {
    /// Set or replace the user's monthly budget limit
    pub fn set_limit(&self, user: &str, amount: Decimal) -> Result<()> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO limits (user, amount) VALUES (?, ?)
            ON CONFLICT(user) DO UPDATE SET amount = excluded.amount,
                                            updated_at = CURRENT_TIMESTAMP
            "#,
            params![user, amount.to_string()],
        )?;

        Ok(())
    }

    /// Look up the user's budget limit, if one is set
    pub fn get_limit(&self, user: &str) -> Result<Option<Decimal>> {
        let conn = self.conn()?;

        let amount = conn
            .query_row(
                "SELECT amount FROM limits WHERE user = ?",
                params![user],
                |row| parse_amount(0, row.get(0)?),
            )
            .optional()?;

        Ok(amount)
    }
}
