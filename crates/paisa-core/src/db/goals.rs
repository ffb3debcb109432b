//! Goal operations

use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Goal, NewGoal};

impl Database {
    /// Create a savings goal.
    pub fn insert_goal(&self, new: &NewGoal) -> Result<Goal> {
        if !new.target_amount.is_finite() || new.target_amount <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "target_amount must be a positive number, got {}",
                new.target_amount
            )));
        }

        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            owner_id: new.owner_id.clone(),
            name: new.name.clone(),
            target_amount: new.target_amount,
            current_amount: new.current_amount,
            target_date: new.target_date.clone(),
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO goals (id, owner_id, name, target_amount, current_amount, target_date)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                goal.id,
                goal.owner_id,
                goal.name,
                goal.target_amount,
                goal.current_amount,
                goal.target_date,
            ],
        )?;

        Ok(goal)
    }

    /// List an owner's goals, insertion order.
    pub fn list_goals(&self, owner_id: &str) -> Result<Vec<Goal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, name, target_amount, current_amount, target_date
             FROM goals WHERE owner_id = ? ORDER BY rowid ASC",
        )?;
        let goals = stmt
            .query_map(params![owner_id], Self::row_to_goal)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(goals)
    }

    /// Fetch one goal within the owner's scope.
    pub fn get_goal(&self, owner_id: &str, id: &str) -> Result<Option<Goal>> {
        let conn = self.conn()?;
        let goal = conn
            .query_row(
                "SELECT id, owner_id, name, target_amount, current_amount, target_date
                 FROM goals WHERE owner_id = ? AND id = ?",
                params![owner_id, id],
                Self::row_to_goal,
            )
            .optional()?;
        Ok(goal)
    }

    /// Record progress towards a goal.
    pub fn update_goal_amount(&self, owner_id: &str, id: &str, current_amount: f64) -> Result<Goal> {
        if !current_amount.is_finite() || current_amount < 0.0 {
            return Err(Error::InvalidInput(format!(
                "current_amount must be a non-negative number, got {}",
                current_amount
            )));
        }

        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE goals SET current_amount = ? WHERE owner_id = ? AND id = ?",
            params![current_amount, owner_id, id],
        )?;
        drop(conn);

        if changed == 0 {
            return Err(Error::NotFound(format!("goal {}", id)));
        }

        self.get_goal(owner_id, id)?
            .ok_or_else(|| Error::NotFound(format!("goal {}", id)))
    }

    pub(crate) fn row_to_goal(row: &Row<'_>) -> rusqlite::Result<Goal> {
        Ok(Goal {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            name: row.get(2)?,
            target_amount: row.get(3)?,
            current_amount: row.get(4)?,
            target_date: row.get(5)?,
        })
    }
}
