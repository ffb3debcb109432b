//! Database access layer with connection pooling and migrations
//!
//! This module is organized by collection:
//! - `expenses` - Expense CRUD and search
//! - `income` - Income entries
//! - `subscriptions` - Subscription registry
//! - `debts` - Debts with derived EMI fields
//! - `budgets` - Monthly category budgets
//! - `recurring` - Recurring templates and atomic materialization
//! - `goals` - Savings goals
//! - `badges` - Earned achievements
//! - `price_watches` - Watched product prices
//! - `preferences` - Per-owner preferences
//!
//! Every operation is scoped to an explicit `owner_id`; nothing in this
//! layer assumes a default owner. The handle itself is constructed by the
//! caller (CLI, server setup, tests) and passed down.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use serde::Serialize;
use tracing::info;

use crate::error::Result;

mod badges;
mod budgets;
mod debts;
mod expenses;
mod goals;
mod income;
mod preferences;
mod price_watches;
mod recurring;
mod subscriptions;

pub use expenses::ExpenseFilter;
pub use recurring::ProcessedEntry;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) a database file and run migrations.
    pub fn open(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because each
    /// pooled connection would otherwise see its own empty in-memory
    /// database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = format!("/tmp/paisa_test_{}.db", id);

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::open(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Per-collection record counts, used by the CLI status command.
    pub fn collection_counts(&self) -> Result<CollectionCounts> {
        let conn = self.conn()?;
        let count = |table: &str| -> Result<i64> {
            Ok(conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", table),
                [],
                |row| row.get(0),
            )?)
        };

        Ok(CollectionCounts {
            expenses: count("expenses")?,
            income: count("income")?,
            subscriptions: count("subscriptions")?,
            debts: count("debts")?,
            budgets: count("budgets")?,
            recurring_transactions: count("recurring_transactions")?,
            goals: count("goals")?,
            badges: count("badges")?,
            price_watches: count("price_watches")?,
        })
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Enable foreign keys
            PRAGMA foreign_keys = ON;

            -- Performance pragmas for local storage (SSD/M.2 recommended)
            -- WAL mode: better concurrency, readers don't block writers
            -- Note: creates -wal and -shm sidecar files alongside the database
            PRAGMA journal_mode = WAL;

            -- Cache size: ~8MB (2000 pages * 4KB default page size)
            PRAGMA cache_size = 2000;

            -- Synchronous NORMAL: good balance of safety and performance
            PRAGMA synchronous = NORMAL;

            -- Store temp tables in memory (faster for complex queries)
            PRAGMA temp_store = MEMORY;

            -- Expenses (spending ledger)
            CREATE TABLE IF NOT EXISTS expenses (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL,
                merchant TEXT,
                date TEXT NOT NULL,                        -- RFC 3339; day bucket = first 10 chars
                currency TEXT NOT NULL DEFAULT 'INR',
                is_regret BOOLEAN NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_expenses_owner ON expenses(owner_id);
            CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
            CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category);

            -- Income (earning ledger)
            CREATE TABLE IF NOT EXISTS income (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                amount REAL NOT NULL,
                source TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                date TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_income_owner ON income(owner_id);
            CREATE INDEX IF NOT EXISTS idx_income_date ON income(date);

            -- Subscriptions (registered recurring services)
            CREATE TABLE IF NOT EXISTS subscriptions (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                name TEXT NOT NULL,
                amount REAL NOT NULL,
                billing_cycle TEXT NOT NULL,               -- monthly, yearly
                next_billing_date TEXT NOT NULL,
                category TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_subscriptions_owner ON subscriptions(owner_id);

            -- Debts (loans with derived EMI schedule)
            CREATE TABLE IF NOT EXISTS debts (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                name TEXT NOT NULL,
                principal_amount REAL NOT NULL,
                interest_rate REAL NOT NULL,               -- annual percent
                tenure_months INTEGER NOT NULL,
                start_date TEXT NOT NULL,
                emi_amount REAL NOT NULL,
                total_interest REAL NOT NULL,
                total_payable REAL NOT NULL,
                status TEXT NOT NULL DEFAULT 'active',     -- active, closed
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_debts_owner ON debts(owner_id);

            -- Budgets (monthly category caps; spent is derived, never stored)
            CREATE TABLE IF NOT EXISTS budgets (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                category TEXT NOT NULL,
                monthly_limit REAL NOT NULL,
                month TEXT NOT NULL,                       -- YYYY-MM
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_budgets_owner_month ON budgets(owner_id, month);

            -- Recurring templates (materialize one ledger entry per month)
            CREATE TABLE IF NOT EXISTS recurring_transactions (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                name TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                kind TEXT NOT NULL,                        -- expense, income
                day_of_month INTEGER NOT NULL,
                currency TEXT NOT NULL DEFAULT 'INR',
                is_active BOOLEAN NOT NULL DEFAULT 1,
                last_processed TEXT,                       -- RFC 3339; YYYY-MM prefix guards re-fires
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_recurring_owner ON recurring_transactions(owner_id);

            -- Goals (savings targets)
            CREATE TABLE IF NOT EXISTS goals (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                name TEXT NOT NULL,
                target_amount REAL NOT NULL,
                current_amount REAL NOT NULL DEFAULT 0,
                target_date TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_goals_owner ON goals(owner_id);

            -- Badges (one per owner and name)
            CREATE TABLE IF NOT EXISTS badges (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                icon TEXT NOT NULL,
                earned_date TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(owner_id, name)
            );

            CREATE INDEX IF NOT EXISTS idx_badges_owner ON badges(owner_id);

            -- Price watches (tracked product prices with history)
            CREATE TABLE IF NOT EXISTS price_watches (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                product_name TEXT NOT NULL,
                current_price REAL NOT NULL,
                target_price REAL NOT NULL,
                product_url TEXT,
                price_history TEXT NOT NULL,               -- JSON array of {price, date}
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_price_watches_owner ON price_watches(owner_id);

            -- Preferences (one row per owner)
            CREATE TABLE IF NOT EXISTS preferences (
                owner_id TEXT PRIMARY KEY,
                personality_mode TEXT NOT NULL DEFAULT 'Balanced',
                language TEXT NOT NULL DEFAULT 'en',
                spending_alerts BOOLEAN NOT NULL DEFAULT 1,
                email TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}

/// Record counts across all collections
#[derive(Debug, Clone, Serialize)]
pub struct CollectionCounts {
    pub expenses: i64,
    pub income: i64,
    pub subscriptions: i64,
    pub debts: i64,
    pub budgets: i64,
    pub recurring_transactions: i64,
    pub goals: i64,
    pub badges: i64,
    pub price_watches: i64,
}
