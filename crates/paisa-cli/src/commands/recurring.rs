//! Recurring template processing command

use anyhow::Result;
use chrono::Utc;
use paisa_core::db::Database;

pub fn cmd_process_recurring(db: &Database, owner: &str) -> Result<()> {
    println!("🔄 Processing recurring templates for {}...", owner);

    let processed = db.process_due_recurring(owner, Utc::now())?;

    if processed.is_empty() {
        println!("   Nothing due today.");
        return Ok(());
    }

    println!();
    for entry in &processed {
        println!(
            "   {} {} ({:.2})",
            entry.kind.as_str(),
            entry.name,
            entry.amount
        );
    }
    println!();
    println!("✅ {} template(s) materialized.", processed.len());

    Ok(())
}
