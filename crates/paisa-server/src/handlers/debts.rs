//! Debt handlers
//!
//! Creation runs the amortization engine; the EMI fields on the stored
//! debt are never supplied by callers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, SuccessResponse};
use paisa_core::models::{Debt, DebtStatus, NewDebt};

use super::OwnerQuery;

/// POST /api/debts - Register a debt and compute its EMI schedule
pub async fn create_debt(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewDebt>,
) -> Result<Json<Debt>, AppError> {
    let debt = state.db.insert_debt(&new)?;
    Ok(Json(debt))
}

/// GET /api/debts - List the owner's debts
pub async fn list_debts(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<Vec<Debt>>, AppError> {
    let debts = state.db.list_debts(&owner.owner_id)?;
    Ok(Json(debts))
}

/// Request body for updating a debt's lifecycle status
#[derive(Debug, Deserialize)]
pub struct UpdateDebtStatusRequest {
    pub status: String,
}

/// PUT /api/debts/:id/status - Mark a debt active or closed
pub async fn update_debt_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(owner): Query<OwnerQuery>,
    Json(req): Json<UpdateDebtStatusRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let status: DebtStatus = req
        .status
        .parse()
        .map_err(|_| AppError::bad_request(&format!("Unknown debt status: {}", req.status)))?;

    state.db.update_debt_status(&owner.owner_id, &id, status)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/debts/:id - Remove a debt
pub async fn delete_debt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_debt(&owner.owner_id, &id)?;
    Ok(Json(SuccessResponse { success: true }))
}
