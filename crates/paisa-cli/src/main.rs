//! Paisa CLI - Personal finance tracker
//!
//! Usage:
//!   paisa init                 Initialize database
//!   paisa serve --port 3000    Start web server
//!   paisa status               Show record counts
//!   paisa emi 100000 10 12     Compute a loan installment

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(&cli.db, &host, port, static_dir.as_deref()).await,
        Commands::Status => commands::cmd_status(&cli.db),
        Commands::ProcessRecurring { owner } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_process_recurring(&db, &owner)
        }
        Commands::Emi {
            principal,
            rate,
            tenure_months,
        } => commands::cmd_emi(principal, rate, tenure_months),
    }
}
