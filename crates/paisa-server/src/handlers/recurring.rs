//! Recurring transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use paisa_core::db::ProcessedEntry;
use paisa_core::models::{NewRecurringTransaction, RecurringTransaction};

use super::OwnerQuery;

/// POST /api/recurring - Create a recurring transaction template
pub async fn create_recurring(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewRecurringTransaction>,
) -> Result<Json<RecurringTransaction>, AppError> {
    let recurring = state.db.insert_recurring(&new)?;
    Ok(Json(recurring))
}

/// GET /api/recurring - List the owner's recurring templates
pub async fn list_recurring(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<Vec<RecurringTransaction>>, AppError> {
    let recurring = state.db.list_recurring(&owner.owner_id)?;
    Ok(Json(recurring))
}

/// Request body for a processing run
#[derive(Debug, Deserialize)]
pub struct ProcessRecurringRequest {
    pub owner_id: String,
}

#[derive(Serialize)]
pub struct ProcessRecurringResponse {
    pub processed: Vec<ProcessedEntry>,
    pub count: usize,
}

/// POST /api/recurring/process - Materialize every template due today.
/// A template already processed this calendar month is skipped, so the
/// run is safe to repeat.
pub async fn process_recurring(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProcessRecurringRequest>,
) -> Result<Json<ProcessRecurringResponse>, AppError> {
    let processed = state.db.process_due_recurring(&req.owner_id, Utc::now())?;

    Ok(Json(ProcessRecurringResponse {
        count: processed.len(),
        processed,
    }))
}
