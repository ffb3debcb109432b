//! Subscription operations

use rusqlite::{params, Row};
use std::str::FromStr;
use uuid::Uuid;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{BillingCycle, NewSubscription, Subscription};

impl Database {
    /// Register a subscription.
    pub fn insert_subscription(&self, new: &NewSubscription) -> Result<Subscription> {
        if !new.amount.is_finite() || new.amount < 0.0 {
            return Err(Error::InvalidInput(format!(
                "amount must be a non-negative number, got {}",
                new.amount
            )));
        }

        let subscription = Subscription {
            id: Uuid::new_v4().to_string(),
            owner_id: new.owner_id.clone(),
            name: new.name.clone(),
            amount: new.amount,
            billing_cycle: new.billing_cycle,
            next_billing_date: new.next_billing_date.clone(),
            category: new.category.clone(),
            is_active: new.is_active,
        };

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO subscriptions (id, owner_id, name, amount, billing_cycle, next_billing_date, category, is_active)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                subscription.id,
                subscription.owner_id,
                subscription.name,
                subscription.amount,
                subscription.billing_cycle.as_str(),
                subscription.next_billing_date,
                subscription.category,
                subscription.is_active,
            ],
        )?;

        Ok(subscription)
    }

    /// List an owner's subscriptions, insertion order.
    pub fn list_subscriptions(&self, owner_id: &str) -> Result<Vec<Subscription>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, name, amount, billing_cycle, next_billing_date, category, is_active
             FROM subscriptions WHERE owner_id = ? ORDER BY rowid ASC",
        )?;
        let subscriptions = stmt
            .query_map(params![owner_id], Self::row_to_subscription)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(subscriptions)
    }

    /// Delete a subscription. Fails with NotFound when nothing was deleted.
    pub fn delete_subscription(&self, owner_id: &str, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "DELETE FROM subscriptions WHERE owner_id = ? AND id = ?",
            params![owner_id, id],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("subscription {}", id)));
        }
        Ok(())
    }

    pub(crate) fn row_to_subscription(row: &Row<'_>) -> rusqlite::Result<Subscription> {
        let cycle: String = row.get(4)?;
        Ok(Subscription {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            name: row.get(2)?,
            amount: row.get(3)?,
            billing_cycle: BillingCycle::from_str(&cycle).unwrap_or(BillingCycle::Monthly),
            next_billing_date: row.get(5)?,
            category: row.get(6)?,
            is_active: row.get(7)?,
        })
    }
}
