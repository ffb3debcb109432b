//! Badge persistence. The `UNIQUE(owner_id, name)` constraint makes
//! awarding idempotent.

use rusqlite::{params, Row};
use uuid::Uuid;

use super::Database;
use crate::error::Result;
use crate::models::{now_timestamp, Badge};

impl Database {
    /// Award a badge unless the owner already holds one with this name.
    /// Returns the badge when it was newly awarded.
    pub fn insert_badge_if_absent(
        &self,
        owner_id: &str,
        name: &str,
        description: &str,
        icon: &str,
    ) -> Result<Option<Badge>> {
        let badge = Badge {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            earned_date: now_timestamp(),
        };

        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO badges (id, owner_id, name, description, icon, earned_date)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                badge.id,
                badge.owner_id,
                badge.name,
                badge.description,
                badge.icon,
                badge.earned_date,
            ],
        )?;

        Ok(if inserted == 1 { Some(badge) } else { None })
    }

    /// List an owner's badges in the order they were earned.
    pub fn list_badges(&self, owner_id: &str) -> Result<Vec<Badge>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, name, description, icon, earned_date
             FROM badges WHERE owner_id = ? ORDER BY rowid ASC",
        )?;
        let badges = stmt
            .query_map(params![owner_id], Self::row_to_badge)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(badges)
    }

    pub(crate) fn row_to_badge(row: &Row<'_>) -> rusqlite::Result<Badge> {
        Ok(Badge {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            icon: row.get(4)?,
            earned_date: row.get(5)?,
        })
    }
}
