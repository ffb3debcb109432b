//! Price watches. The full observation history is stored as a JSON
//! column and rewritten on every update.

use rusqlite::{params, Row};
use uuid::Uuid;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{now_timestamp, NewPriceWatch, PricePoint, PriceWatch};

impl Database {
    /// Start watching a product. The history is seeded with the current
    /// price so trend math always has a baseline.
    pub fn insert_price_watch(&self, new: &NewPriceWatch) -> Result<PriceWatch> {
        if !new.current_price.is_finite() || new.current_price < 0.0 {
            return Err(Error::InvalidInput(format!(
                "current_price must be a non-negative number, got {}",
                new.current_price
            )));
        }

        let watch = PriceWatch {
            id: Uuid::new_v4().to_string(),
            owner_id: new.owner_id.clone(),
            product_name: new.product_name.clone(),
            current_price: new.current_price,
            target_price: new.target_price,
            product_url: new.product_url.clone(),
            price_history: vec![PricePoint {
                price: new.current_price,
                date: now_timestamp(),
            }],
        };

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO price_watches
             (id, owner_id, product_name, current_price, target_price, product_url, price_history)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                watch.id,
                watch.owner_id,
                watch.product_name,
                watch.current_price,
                watch.target_price,
                watch.product_url,
                serde_json::to_string(&watch.price_history)?,
            ],
        )?;

        Ok(watch)
    }

    /// List an owner's price watches in insertion order.
    pub fn list_price_watches(&self, owner_id: &str) -> Result<Vec<PriceWatch>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, product_name, current_price, target_price, product_url, price_history
             FROM price_watches WHERE owner_id = ? ORDER BY rowid ASC",
        )?;
        let rows = stmt
            .query_map(params![owner_id], Self::row_to_price_watch_raw)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(Self::parse_price_watch).collect()
    }

    /// Record a new observed price for a watch, appending to its history.
    pub fn update_price(&self, owner_id: &str, id: &str, price: f64) -> Result<PriceWatch> {
        if !price.is_finite() || price < 0.0 {
            return Err(Error::InvalidInput(format!(
                "price must be a non-negative number, got {}",
                price
            )));
        }

        let conn = self.conn()?;
        let raw = conn
            .query_row(
                "SELECT id, owner_id, product_name, current_price, target_price, product_url, price_history
                 FROM price_watches WHERE owner_id = ? AND id = ?",
                params![owner_id, id],
                Self::row_to_price_watch_raw,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    Error::NotFound(format!("Price watch not found: {}", id))
                }
                other => Error::Database(other),
            })?;

        let mut watch = Self::parse_price_watch(raw)?;
        watch.current_price = price;
        watch.price_history.push(PricePoint {
            price,
            date: now_timestamp(),
        });

        conn.execute(
            "UPDATE price_watches SET current_price = ?, price_history = ?
             WHERE owner_id = ? AND id = ?",
            params![
                watch.current_price,
                serde_json::to_string(&watch.price_history)?,
                owner_id,
                id,
            ],
        )?;

        Ok(watch)
    }

    fn row_to_price_watch_raw(row: &Row<'_>) -> rusqlite::Result<(PriceWatch, String)> {
        let watch = PriceWatch {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            product_name: row.get(2)?,
            current_price: row.get(3)?,
            target_price: row.get(4)?,
            product_url: row.get(5)?,
            price_history: Vec::new(),
        };
        let history: String = row.get(6)?;
        Ok((watch, history))
    }

    fn parse_price_watch((mut watch, history): (PriceWatch, String)) -> Result<PriceWatch> {
        watch.price_history = serde_json::from_str(&history)?;
        Ok(watch)
    }
}
