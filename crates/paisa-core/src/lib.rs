//! Paisa Core Library
//!
//! Shared functionality for the Paisa personal finance tracker:
//! - Database access for the ledger collections (expenses, income,
//!   subscriptions, debts, budgets, goals, recurring templates, badges,
//!   price watches, preferences)
//! - EMI arithmetic for debt schedules
//! - Pure analytics reducers (dashboard, trends, budgets, duplicates,
//!   behaviour patterns, merchants, badges, goals, recommendations,
//!   category insights, weekly reports)
//! - Pluggable local AI backends (Ollama, OpenAI-compatible servers) and
//!   the assistant operations built on them

pub mod ai;
pub mod analytics;
pub mod db;
pub mod error;
pub mod finance;
pub mod models;

pub use ai::{AiBackend, AiClient, Assistant, MockBackend, OllamaBackend, OpenAICompatibleBackend};
pub use db::Database;
pub use error::{Error, Result};
pub use finance::{compute_emi, round2, EmiSchedule};
