//! Budget handlers
//!
//! Spent-so-far is derived from the month's ledger at read time; only the
//! limit is stored.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::{AppError, AppState};
use paisa_core::analytics;
use paisa_core::models::{current_month, Budget, NewBudget};

use super::OwnerQuery;

/// POST /api/budgets - Set a monthly spending cap for one category
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewBudget>,
) -> Result<Json<Budget>, AppError> {
    let budget = state.db.insert_budget(&new)?;
    Ok(Json(budget))
}

/// A stored budget with the month's derived spend attached
#[derive(Serialize)]
pub struct BudgetWithSpent {
    #[serde(flatten)]
    pub budget: Budget,
    pub current_spent: f64,
}

/// GET /api/budgets - List the current month's budgets with spend so far
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<Vec<BudgetWithSpent>>, AppError> {
    let month = current_month();
    let budgets = state.db.list_budgets(&owner.owner_id, &month)?;

    let mut with_spent = Vec::with_capacity(budgets.len());
    for budget in budgets {
        let expenses = state
            .db
            .expenses_in_month(&owner.owner_id, &budget.category, &month)?;
        let current_spent = expenses.iter().map(|e| e.amount).sum();
        with_spent.push(BudgetWithSpent {
            budget,
            current_spent,
        });
    }

    Ok(Json(with_spent))
}

/// GET /api/budgets/:category/status - Budget consumption for one category
/// this month. Answers `no_limit` when no budget is set.
pub async fn get_budget_status(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let month = current_month();

    let Some(budget) = state.db.find_budget(&owner.owner_id, &category, &month)? else {
        return Ok(Json(serde_json::json!({
            "status": "no_limit",
            "message": "No budget set for this category"
        })));
    };

    let expenses = state
        .db
        .expenses_in_month(&owner.owner_id, &category, &month)?;
    let status = analytics::budget_status(&budget, &expenses);

    Ok(Json(serde_json::json!(status)))
}
