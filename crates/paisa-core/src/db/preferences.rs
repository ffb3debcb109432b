//! Per-owner preference storage, one row per owner.

use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::error::Result;
use crate::models::{NewPreferences, Preferences};

impl Database {
    /// Fetch an owner's preferences, falling back to the defaults when
    /// nothing has been saved yet.
    pub fn get_preferences(&self, owner_id: &str) -> Result<Preferences> {
        let conn = self.conn()?;
        let prefs = conn
            .query_row(
                "SELECT owner_id, personality_mode, language, spending_alerts, email
                 FROM preferences WHERE owner_id = ?",
                params![owner_id],
                Self::row_to_preferences,
            )
            .optional()?;
        Ok(prefs.unwrap_or_else(|| Preferences::default_for(owner_id)))
    }

    /// Save an owner's preferences, replacing any existing row.
    pub fn upsert_preferences(&self, new: &NewPreferences) -> Result<Preferences> {
        let prefs = Preferences {
            owner_id: new.owner_id.clone(),
            personality_mode: new.personality_mode.clone(),
            language: new.language.clone(),
            spending_alerts: new.spending_alerts,
            email: new.email.clone(),
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO preferences (owner_id, personality_mode, language, spending_alerts, email)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(owner_id) DO UPDATE SET
                 personality_mode = excluded.personality_mode,
                 language = excluded.language,
                 spending_alerts = excluded.spending_alerts,
                 email = excluded.email",
            params![
                prefs.owner_id,
                prefs.personality_mode,
                prefs.language,
                prefs.spending_alerts,
                prefs.email,
            ],
        )?;

        Ok(prefs)
    }

    fn row_to_preferences(row: &Row<'_>) -> rusqlite::Result<Preferences> {
        Ok(Preferences {
            owner_id: row.get(0)?,
            personality_mode: row.get(1)?,
            language: row.get(2)?,
            spending_alerts: row.get(3)?,
            email: row.get(4)?,
        })
    }
}
