//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, emi) and shared utilities (open_db)
//! - `recurring` - Recurring template processing
//! - `serve` - Web server command
//! - `status` - Database status command

pub mod core;
pub mod recurring;
pub mod serve;
pub mod status;

// Re-export command functions for main.rs
pub use core::*;
pub use recurring::*;
pub use serve::*;
pub use status::*;
