//! Expense operations

use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{now_timestamp, Expense, NewExpense, UpdateExpense};

/// Optional conjunctive filters for expense search
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Case-insensitive substring over description and merchant
    pub text: Option<String>,
    pub category: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    /// Inclusive RFC 3339 lower bound
    pub start_date: Option<String>,
    /// Inclusive RFC 3339 upper bound
    pub end_date: Option<String>,
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidInput(format!(
            "amount must be a non-negative number, got {}",
            amount
        )));
    }
    Ok(())
}

impl Database {
    /// Insert an expense, assigning its id and timestamp.
    pub fn insert_expense(&self, new: &NewExpense) -> Result<Expense> {
        validate_amount(new.amount)?;

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            owner_id: new.owner_id.clone(),
            amount: new.amount,
            category: new.category.clone(),
            description: new.description.clone(),
            merchant: new.merchant.clone(),
            date: new.date.clone().unwrap_or_else(now_timestamp),
            currency: new.currency.clone(),
            is_regret: new.is_regret,
        };

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO expenses (id, owner_id, amount, category, description, merchant, date, currency, is_regret)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                expense.id,
                expense.owner_id,
                expense.amount,
                expense.category,
                expense.description,
                expense.merchant,
                expense.date,
                expense.currency,
                expense.is_regret,
            ],
        )?;

        Ok(expense)
    }

    /// List an owner's expenses, newest first (display order).
    pub fn list_expenses(&self, owner_id: &str) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, amount, category, description, merchant, date, currency, is_regret
             FROM expenses WHERE owner_id = ? ORDER BY date DESC, rowid DESC",
        )?;
        let expenses = stmt
            .query_map(params![owner_id], Self::row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// All of an owner's expenses in insertion order, the order the
    /// aggregation reducers expect.
    pub fn all_expenses(&self, owner_id: &str) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, amount, category, description, merchant, date, currency, is_regret
             FROM expenses WHERE owner_id = ? ORDER BY rowid ASC",
        )?;
        let expenses = stmt
            .query_map(params![owner_id], Self::row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// Fetch one expense within the owner's scope.
    pub fn get_expense(&self, owner_id: &str, id: &str) -> Result<Option<Expense>> {
        let conn = self.conn()?;
        let expense = conn
            .query_row(
                "SELECT id, owner_id, amount, category, description, merchant, date, currency, is_regret
                 FROM expenses WHERE owner_id = ? AND id = ?",
                params![owner_id, id],
                Self::row_to_expense,
            )
            .optional()?;
        Ok(expense)
    }

    /// Update an expense in place. Fails with NotFound when the id does not
    /// exist for this owner.
    pub fn update_expense(&self, owner_id: &str, id: &str, update: &UpdateExpense) -> Result<Expense> {
        validate_amount(update.amount)?;

        let conn = self.conn()?;
        let changed = conn.execute(
            r#"
            UPDATE expenses
            SET amount = ?, category = ?, description = ?, merchant = ?, is_regret = ?
            WHERE owner_id = ? AND id = ?
            "#,
            params![
                update.amount,
                update.category,
                update.description,
                update.merchant,
                update.is_regret,
                owner_id,
                id,
            ],
        )?;
        drop(conn);

        if changed == 0 {
            return Err(Error::NotFound(format!("expense {}", id)));
        }

        self.get_expense(owner_id, id)?
            .ok_or_else(|| Error::NotFound(format!("expense {}", id)))
    }

    /// Delete an expense. Fails with NotFound when nothing was deleted.
    pub fn delete_expense(&self, owner_id: &str, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "DELETE FROM expenses WHERE owner_id = ? AND id = ?",
            params![owner_id, id],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("expense {}", id)));
        }
        Ok(())
    }

    /// Search an owner's expenses with conjunctive filters, newest first.
    pub fn search_expenses(&self, owner_id: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        // Build dynamic WHERE clause
        let mut conditions = vec!["owner_id = ?".to_string()];
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(owner_id.to_string())];

        if let Some(ref q) = filter.text {
            if !q.trim().is_empty() {
                conditions.push(
                    "(description LIKE ? COLLATE NOCASE OR merchant LIKE ? COLLATE NOCASE)"
                        .to_string(),
                );
                let pattern = format!("%{}%", q.trim());
                params.push(Box::new(pattern.clone()));
                params.push(Box::new(pattern));
            }
        }

        if let Some(ref category) = filter.category {
            conditions.push("category = ?".to_string());
            params.push(Box::new(category.clone()));
        }

        if let Some(min) = filter.min_amount {
            conditions.push("amount >= ?".to_string());
            params.push(Box::new(min));
        }

        if let Some(max) = filter.max_amount {
            conditions.push("amount <= ?".to_string());
            params.push(Box::new(max));
        }

        if let Some(ref start) = filter.start_date {
            conditions.push("date >= ?".to_string());
            params.push(Box::new(start.clone()));
        }

        if let Some(ref end) = filter.end_date {
            conditions.push("date <= ?".to_string());
            params.push(Box::new(end.clone()));
        }

        let sql = format!(
            "SELECT id, owner_id, amount, category, description, merchant, date, currency, is_regret
             FROM expenses WHERE {} ORDER BY date DESC, rowid DESC",
            conditions.join(" AND ")
        );

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let expenses = stmt
            .query_map(params_refs.as_slice(), Self::row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// An owner's expenses for one category in a given `YYYY-MM` month,
    /// matched on the timestamp prefix.
    pub fn expenses_in_month(
        &self,
        owner_id: &str,
        category: &str,
        month: &str,
    ) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, amount, category, description, merchant, date, currency, is_regret
             FROM expenses WHERE owner_id = ? AND category = ? AND date LIKE ? ORDER BY rowid ASC",
        )?;
        let expenses = stmt
            .query_map(
                params![owner_id, category, format!("{}%", month)],
                Self::row_to_expense,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// An owner's expenses on or after the given RFC 3339 timestamp.
    pub fn expenses_since(&self, owner_id: &str, since: &str) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, amount, category, description, merchant, date, currency, is_regret
             FROM expenses WHERE owner_id = ? AND date >= ? ORDER BY rowid ASC",
        )?;
        let expenses = stmt
            .query_map(params![owner_id, since], Self::row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    /// All of an owner's expenses for one category, insertion order.
    pub fn expenses_by_category(&self, owner_id: &str, category: &str) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, amount, category, description, merchant, date, currency, is_regret
             FROM expenses WHERE owner_id = ? AND category = ? ORDER BY rowid ASC",
        )?;
        let expenses = stmt
            .query_map(params![owner_id, category], Self::row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(expenses)
    }

    pub(crate) fn row_to_expense(row: &Row<'_>) -> rusqlite::Result<Expense> {
        Ok(Expense {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            amount: row.get(2)?,
            category: row.get(3)?,
            description: row.get(4)?,
            merchant: row.get(5)?,
            date: row.get(6)?,
            currency: row.get(7)?,
            is_regret: row.get(8)?,
        })
    }
}
