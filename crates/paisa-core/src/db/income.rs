//! Income operations

use rusqlite::{params, Row};
use uuid::Uuid;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{now_timestamp, Income, NewIncome};

impl Database {
    /// Insert an income entry, assigning its id and timestamp.
    pub fn insert_income(&self, new: &NewIncome) -> Result<Income> {
        if !new.amount.is_finite() || new.amount < 0.0 {
            return Err(Error::InvalidInput(format!(
                "amount must be a non-negative number, got {}",
                new.amount
            )));
        }

        let income = Income {
            id: Uuid::new_v4().to_string(),
            owner_id: new.owner_id.clone(),
            amount: new.amount,
            source: new.source.clone(),
            description: new.description.clone(),
            date: new.date.clone().unwrap_or_else(now_timestamp),
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO income (id, owner_id, amount, source, description, date)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                income.id,
                income.owner_id,
                income.amount,
                income.source,
                income.description,
                income.date,
            ],
        )?;

        Ok(income)
    }

    /// List an owner's income entries, newest first.
    pub fn list_income(&self, owner_id: &str) -> Result<Vec<Income>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, amount, source, description, date
             FROM income WHERE owner_id = ? ORDER BY date DESC, rowid DESC",
        )?;
        let entries = stmt
            .query_map(params![owner_id], Self::row_to_income)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// All of an owner's income in insertion order, for the reducers.
    pub fn all_income(&self, owner_id: &str) -> Result<Vec<Income>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, amount, source, description, date
             FROM income WHERE owner_id = ? ORDER BY rowid ASC",
        )?;
        let entries = stmt
            .query_map(params![owner_id], Self::row_to_income)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// An owner's income on or after the given RFC 3339 timestamp.
    pub fn income_since(&self, owner_id: &str, since: &str) -> Result<Vec<Income>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, amount, source, description, date
             FROM income WHERE owner_id = ? AND date >= ? ORDER BY rowid ASC",
        )?;
        let entries = stmt
            .query_map(params![owner_id, since], Self::row_to_income)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub(crate) fn row_to_income(row: &Row<'_>) -> rusqlite::Result<Income> {
        Ok(Income {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            amount: row.get(2)?,
            source: row.get(3)?,
            description: row.get(4)?,
            date: row.get(5)?,
        })
    }
}
