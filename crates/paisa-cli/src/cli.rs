//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Paisa - Track spending, budgets, debts and goals
#[derive(Parser)]
#[command(name = "paisa")]
#[command(about = "Self-hosted personal finance tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "paisa.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Show database status and record counts
    Status,

    /// Materialize recurring templates due today
    ProcessRecurring {
        /// Owner whose templates to process
        #[arg(long)]
        owner: String,
    },

    /// Compute the monthly installment for a loan
    Emi {
        /// Loan principal
        principal: f64,

        /// Annual interest rate in percent
        rate: f64,

        /// Repayment period in months
        tenure_months: u32,
    },
}
