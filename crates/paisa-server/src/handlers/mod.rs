//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

use serde::Deserialize;

pub mod analytics;
pub mod assistant;
pub mod badges;
pub mod budgets;
pub mod debts;
pub mod expenses;
pub mod goals;
pub mod income;
pub mod preferences;
pub mod price_watches;
pub mod recommendations;
pub mod recurring;
pub mod reports;
pub mod subscriptions;

// Re-export all handlers for use in router
pub use analytics::*;
pub use assistant::*;
pub use badges::*;
pub use budgets::*;
pub use debts::*;
pub use expenses::*;
pub use goals::*;
pub use income::*;
pub use preferences::*;
pub use price_watches::*;
pub use recommendations::*;
pub use recurring::*;
pub use reports::*;
pub use subscriptions::*;

/// Query parameter naming the owner whose records a read touches.
/// Missing it rejects the request with a 400.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub owner_id: String,
}
