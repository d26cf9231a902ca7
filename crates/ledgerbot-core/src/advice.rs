//! Recommendation rules and the budget monitor
//!
//! Both work on the aggregates of one user-month. All threshold comparisons
//! are strictly greater-than: a total sitting exactly on a threshold stays in
//! the lower band.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::models::money;
use crate::summary::MonthlySummary;

/// Raised after an expense commit pushes the month past the stored limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetAlert {
    pub limit: Decimal,
    pub total: Decimal,
}

impl std::fmt::Display for BudgetAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Budget alert: this month's expenses reached {} and your limit is {}.",
            money(self.total),
            money(self.limit)
        )
    }
}

/// Derive the recommendation text for a month, first match wins:
///
/// 1. a discretionary category total above the category threshold (categories
///    are visited in the summary's sorted order, so the reported one is
///    deterministic);
/// 2. total expenses above the high threshold;
/// 3. total expenses above the moderate threshold;
/// 4. otherwise, positive reinforcement.
pub fn recommendation(cfg: &Config, summary: &MonthlySummary) -> String {
    for (category, total) in &summary.categories {
        if *total > cfg.category_threshold && cfg.is_discretionary(category) {
            return format!(
                "Consider cutting back on '{}' ({}).",
                category,
                money(*total)
            );
        }
    }

    if summary.total_expenses > cfg.high_threshold {
        "You are spending too much! Cut down on overall expenses.".to_string()
    } else if summary.total_expenses > cfg.moderate_threshold {
        "Your spending is moderate. Try to save a bit more.".to_string()
    } else {
        "Your spending is under control. Well done!".to_string()
    }
}

/// Recompute the month's expense total and compare it against the stored
/// limit. Silent when no limit is set or the total does not exceed it.
///
/// Advisory only: the caller has already committed the expense and never
/// rolls it back because of an alert.
pub fn check_budget(
    db: &Database,
    user: &str,
    month: u32,
    year: i32,
) -> Result<Option<BudgetAlert>> {
    let Some(limit) = db.get_limit(user)? else {
        return Ok(None);
    };

    let total: Decimal = db
        .list_expenses(user, Some(month), Some(year))?
        .iter()
        .map(|e| e.amount)
        .sum();

    if total > limit {
        warn!(user, %total, %limit, "Budget limit exceeded");
        Ok(Some(BudgetAlert { limit, total }))
    } else {
        debug!(user, %total, %limit, "Budget within limit");
        Ok(None)
    }
}
