//! Recurring transaction templates and their monthly materialization.
//!
//! A template fires when today's day-of-month matches and it has not
//! already been processed this calendar month. The claim is a conditional
//! UPDATE inside the same transaction as the ledger insert, so concurrent
//! processing runs cannot materialize a template twice.

use chrono::{DateTime, Datelike, Utc};
use rusqlite::{params, Row};
use serde::Serialize;
use uuid::Uuid;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{EntryKind, NewRecurringTransaction, RecurringTransaction};

/// One materialized template, as reported back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedEntry {
    pub name: String,
    pub kind: EntryKind,
    pub amount: f64,
}

impl Database {
    /// Insert a recurring transaction template.
    pub fn insert_recurring(&self, new: &NewRecurringTransaction) -> Result<RecurringTransaction> {
        if !new.amount.is_finite() || new.amount < 0.0 {
            return Err(Error::InvalidInput(format!(
                "amount must be a non-negative number, got {}",
                new.amount
            )));
        }
        if new.day_of_month < 1 || new.day_of_month > 31 {
            return Err(Error::InvalidInput(format!(
                "day_of_month must be between 1 and 31, got {}",
                new.day_of_month
            )));
        }

        let template = RecurringTransaction {
            id: Uuid::new_v4().to_string(),
            owner_id: new.owner_id.clone(),
            name: new.name.clone(),
            amount: new.amount,
            category: new.category.clone(),
            kind: new.kind,
            day_of_month: new.day_of_month,
            currency: new.currency.clone(),
            is_active: new.is_active,
            last_processed: None,
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO recurring_transactions
             (id, owner_id, name, amount, category, kind, day_of_month, currency, is_active, last_processed)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                template.id,
                template.owner_id,
                template.name,
                template.amount,
                template.category,
                template.kind.as_str(),
                template.day_of_month,
                template.currency,
                template.is_active,
                template.last_processed,
            ],
        )?;

        Ok(template)
    }

    /// List an owner's recurring templates in insertion order.
    pub fn list_recurring(&self, owner_id: &str) -> Result<Vec<RecurringTransaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, name, amount, category, kind, day_of_month, currency,
                    is_active, last_processed
             FROM recurring_transactions WHERE owner_id = ? ORDER BY rowid ASC",
        )?;
        let templates = stmt
            .query_map(params![owner_id], Self::row_to_recurring)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(templates)
    }

    /// Materialize every template due at `now` into the expense or income
    /// ledger. Returns the entries that actually fired; a template already
    /// processed this month is skipped.
    pub fn process_due_recurring(
        &self,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ProcessedEntry>> {
        let today = now.day();
        let month = now.format("%Y-%m").to_string();
        let stamp = now.to_rfc3339();
        let date = now.to_rfc3339();

        let due: Vec<RecurringTransaction> = self
            .list_recurring(owner_id)?
            .into_iter()
            .filter(|t| t.is_active && t.day_of_month == today)
            .collect();

        let mut processed = Vec::new();
        let mut conn = self.conn()?;

        for template in due {
            let tx = conn.transaction()?;

            // Claim the template for this month. Re-checks the due predicate
            // so a concurrent run that got here first makes this a no-op.
            let claimed = tx.execute(
                "UPDATE recurring_transactions SET last_processed = ?
                 WHERE id = ? AND owner_id = ? AND is_active = 1 AND day_of_month = ?
                   AND (last_processed IS NULL OR substr(last_processed, 1, 7) <> ?)",
                params![stamp, template.id, owner_id, today, month],
            )?;
            if claimed == 0 {
                continue;
            }

            match template.kind {
                EntryKind::Expense => {
                    tx.execute(
                        "INSERT INTO expenses
                         (id, owner_id, amount, category, description, merchant, date, currency, is_regret)
                         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                        params![
                            Uuid::new_v4().to_string(),
                            owner_id,
                            template.amount,
                            template.category,
                            format!("{} (Auto-added)", template.name),
                            Option::<String>::None,
                            date,
                            template.currency,
                            false,
                        ],
                    )?;
                }
                EntryKind::Income => {
                    tx.execute(
                        "INSERT INTO income (id, owner_id, amount, source, description, date)
                         VALUES (?, ?, ?, ?, ?, ?)",
                        params![
                            Uuid::new_v4().to_string(),
                            owner_id,
                            template.amount,
                            template.name,
                            "",
                            date,
                        ],
                    )?;
                }
            }

            tx.commit()?;
            processed.push(ProcessedEntry {
                name: template.name,
                kind: template.kind,
                amount: template.amount,
            });
        }

        Ok(processed)
    }

    pub(crate) fn row_to_recurring(row: &Row<'_>) -> rusqlite::Result<RecurringTransaction> {
        let kind: String = row.get(5)?;
        Ok(RecurringTransaction {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            name: row.get(2)?,
            amount: row.get(3)?,
            category: row.get(4)?,
            kind: kind.parse().unwrap_or(EntryKind::Expense),
            day_of_month: row.get(6)?,
            currency: row.get(7)?,
            is_active: row.get(8)?,
            last_processed: row.get(9)?,
        })
    }
}
