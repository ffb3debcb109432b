//! Expense ledger handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, SuccessResponse};
use paisa_core::analytics::{self, DuplicateCluster};
use paisa_core::db::ExpenseFilter;
use paisa_core::models::{Expense, NewExpense, UpdateExpense};

use super::OwnerQuery;

/// POST /api/expenses - Record an expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewExpense>,
) -> Result<Json<Expense>, AppError> {
    let expense = state.db.insert_expense(&new)?;
    Ok(Json(expense))
}

/// GET /api/expenses - List the owner's expenses, newest first
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let expenses = state.db.list_expenses(&owner.owner_id)?;
    Ok(Json(expenses))
}

/// PUT /api/expenses/:id - Replace an expense's mutable fields
pub async fn update_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(owner): Query<OwnerQuery>,
    Json(update): Json<UpdateExpense>,
) -> Result<Json<Expense>, AppError> {
    let expense = state.db.update_expense(&owner.owner_id, &id, &update)?;
    Ok(Json(expense))
}

/// DELETE /api/expenses/:id - Remove an expense
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_expense(&owner.owner_id, &id)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Query parameters for expense search. All filters are optional and
/// conjunctive.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub owner_id: String,
    /// Case-insensitive substring over description and merchant
    pub query: Option<String>,
    pub category: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub results: Vec<Expense>,
    pub count: usize,
}

/// GET /api/expenses/search - Filtered expense search
pub async fn search_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let filter = ExpenseFilter {
        text: params.query,
        category: params.category,
        min_amount: params.min_amount,
        max_amount: params.max_amount,
        start_date: params.start_date,
        end_date: params.end_date,
    };

    let results = state.db.search_expenses(&params.owner_id, &filter)?;

    Ok(Json(SearchResponse {
        count: results.len(),
        results,
    }))
}

#[derive(Serialize)]
pub struct DuplicatesResponse {
    pub duplicates: Vec<DuplicateCluster>,
    pub count: usize,
}

/// GET /api/expenses/duplicates - Same-day duplicate charge clusters
pub async fn detect_duplicates(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<DuplicatesResponse>, AppError> {
    let expenses = state.db.all_expenses(&owner.owner_id)?;
    let duplicates = analytics::find_duplicates(&expenses);

    Ok(Json(DuplicatesResponse {
        count: duplicates.len(),
        duplicates,
    }))
}
