//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_emi` - Loan installment calculator

use std::path::Path;

use anyhow::{Context, Result};
use paisa_core::db::Database;
use paisa_core::finance::compute_emi;

/// Open (or create) the database, running migrations.
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("database path is not valid UTF-8")?;
    Database::open(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Start the web server: paisa serve");
    println!("  2. Record an expense: POST /api/expenses");

    Ok(())
}

pub fn cmd_emi(principal: f64, rate: f64, tenure_months: u32) -> Result<()> {
    let schedule = compute_emi(principal, rate, tenure_months)?;

    println!();
    println!("💳 Loan Schedule");
    println!("   ─────────────────────────────");
    println!("   Principal: {:.2}", principal);
    println!("   Rate: {}% per year", rate);
    println!("   Tenure: {} months", tenure_months);
    println!();
    println!("   Monthly installment: {:.2}", schedule.emi_amount);
    println!("   Total interest: {:.2}", schedule.total_interest);
    println!("   Total payable: {:.2}", schedule.total_payable);

    Ok(())
}
