//! Database status command

use std::fs;
use std::path::Path;

use anyhow::Result;

use super::open_db;

pub fn cmd_status(db_path: &Path) -> Result<()> {
    println!();
    println!("📊 Paisa Status");
    println!("   ─────────────────────────────");
    println!("   Database: {}", db_path.display());

    // Check if database file exists and get size
    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
        println!();
        return Ok(());
    }

    let db = open_db(db_path)?;
    let counts = db.collection_counts()?;

    println!();
    println!("   Expenses: {}", counts.expenses);
    println!("   Income entries: {}", counts.income);
    println!("   Subscriptions: {}", counts.subscriptions);
    println!("   Debts: {}", counts.debts);
    println!("   Budgets: {}", counts.budgets);
    println!("   Recurring templates: {}", counts.recurring_transactions);
    println!("   Goals: {}", counts.goals);
    println!("   Badges: {}", counts.badges);
    println!("   Price watches: {}", counts.price_watches);
    println!();

    Ok(())
}
