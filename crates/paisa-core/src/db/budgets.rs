//! Budget operations

use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{current_month, Budget, NewBudget};

impl Database {
    /// Set a monthly category budget. The month defaults to the current one.
    pub fn insert_budget(&self, new: &NewBudget) -> Result<Budget> {
        if !new.monthly_limit.is_finite() || new.monthly_limit <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "monthly_limit must be a positive number, got {}",
                new.monthly_limit
            )));
        }

        let budget = Budget {
            id: Uuid::new_v4().to_string(),
            owner_id: new.owner_id.clone(),
            category: new.category.clone(),
            monthly_limit: new.monthly_limit,
            month: new.month.clone().unwrap_or_else(current_month),
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO budgets (id, owner_id, category, monthly_limit, month)
             VALUES (?, ?, ?, ?, ?)",
            params![
                budget.id,
                budget.owner_id,
                budget.category,
                budget.monthly_limit,
                budget.month,
            ],
        )?;

        Ok(budget)
    }

    /// List an owner's budgets for one `YYYY-MM` month.
    pub fn list_budgets(&self, owner_id: &str, month: &str) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, category, monthly_limit, month
             FROM budgets WHERE owner_id = ? AND month = ? ORDER BY rowid ASC",
        )?;
        let budgets = stmt
            .query_map(params![owner_id, month], Self::row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(budgets)
    }

    /// The budget for one category in one month, if set.
    pub fn find_budget(&self, owner_id: &str, category: &str, month: &str) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                "SELECT id, owner_id, category, monthly_limit, month
                 FROM budgets WHERE owner_id = ? AND category = ? AND month = ?
                 ORDER BY rowid ASC LIMIT 1",
                params![owner_id, category, month],
                Self::row_to_budget,
            )
            .optional()?;
        Ok(budget)
    }

    pub(crate) fn row_to_budget(row: &Row<'_>) -> rusqlite::Result<Budget> {
        Ok(Budget {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            category: row.get(2)?,
            monthly_limit: row.get(3)?,
            month: row.get(4)?,
        })
    }
}
