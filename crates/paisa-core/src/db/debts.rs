//! Debt operations
//!
//! The EMI fields stored here are always the amortization engine's output;
//! `insert_debt` runs the engine on the caller's terms before writing.

use rusqlite::{params, Row};
use std::str::FromStr;
use uuid::Uuid;

use super::Database;
use crate::error::{Error, Result};
use crate::finance::compute_emi;
use crate::models::{now_timestamp, Debt, DebtStatus, NewDebt};

impl Database {
    /// Register a debt, deriving its EMI schedule from the principal, rate
    /// and tenure. Invalid loan terms surface as InvalidInput.
    pub fn insert_debt(&self, new: &NewDebt) -> Result<Debt> {
        let schedule = compute_emi(new.principal_amount, new.interest_rate, new.tenure_months)?;

        let debt = Debt {
            id: Uuid::new_v4().to_string(),
            owner_id: new.owner_id.clone(),
            name: new.name.clone(),
            principal_amount: new.principal_amount,
            interest_rate: new.interest_rate,
            tenure_months: new.tenure_months,
            start_date: new.start_date.clone().unwrap_or_else(now_timestamp),
            emi_amount: schedule.emi_amount,
            total_interest: schedule.total_interest,
            total_payable: schedule.total_payable,
            status: DebtStatus::Active,
        };

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO debts (id, owner_id, name, principal_amount, interest_rate, tenure_months,
                               start_date, emi_amount, total_interest, total_payable, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                debt.id,
                debt.owner_id,
                debt.name,
                debt.principal_amount,
                debt.interest_rate,
                debt.tenure_months,
                debt.start_date,
                debt.emi_amount,
                debt.total_interest,
                debt.total_payable,
                debt.status.as_str(),
            ],
        )?;

        Ok(debt)
    }

    /// List an owner's debts, insertion order.
    pub fn list_debts(&self, owner_id: &str) -> Result<Vec<Debt>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, name, principal_amount, interest_rate, tenure_months,
                    start_date, emi_amount, total_interest, total_payable, status
             FROM debts WHERE owner_id = ? ORDER BY rowid ASC",
        )?;
        let debts = stmt
            .query_map(params![owner_id], Self::row_to_debt)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(debts)
    }

    /// Change a debt's lifecycle status.
    pub fn update_debt_status(&self, owner_id: &str, id: &str, status: DebtStatus) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE debts SET status = ? WHERE owner_id = ? AND id = ?",
            params![status.as_str(), owner_id, id],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("debt {}", id)));
        }
        Ok(())
    }

    /// Delete a debt. Fails with NotFound when nothing was deleted.
    pub fn delete_debt(&self, owner_id: &str, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "DELETE FROM debts WHERE owner_id = ? AND id = ?",
            params![owner_id, id],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("debt {}", id)));
        }
        Ok(())
    }

    pub(crate) fn row_to_debt(row: &Row<'_>) -> rusqlite::Result<Debt> {
        let status: String = row.get(10)?;
        Ok(Debt {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            name: row.get(2)?,
            principal_amount: row.get(3)?,
            interest_rate: row.get(4)?,
            tenure_months: row.get(5)?,
            start_date: row.get(6)?,
            emi_amount: row.get(7)?,
            total_interest: row.get(8)?,
            total_payable: row.get(9)?,
            status: DebtStatus::from_str(&status).unwrap_or(DebtStatus::Active),
        })
    }
}
