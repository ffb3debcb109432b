//! Income ledger handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{AppError, AppState};
use paisa_core::models::{Income, NewIncome};

use super::OwnerQuery;

/// POST /api/income - Record an income entry
pub async fn create_income(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewIncome>,
) -> Result<Json<Income>, AppError> {
    let income = state.db.insert_income(&new)?;
    Ok(Json(income))
}

/// GET /api/income - List the owner's income entries, newest first
pub async fn list_income(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<Vec<Income>>, AppError> {
    let income = state.db.list_income(&owner.owner_id)?;
    Ok(Json(income))
}
