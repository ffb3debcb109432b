//! Preference handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{AppError, AppState};
use paisa_core::models::{NewPreferences, Preferences};

use super::OwnerQuery;

/// GET /api/preferences - The owner's preferences, falling back to
/// defaults when nothing was ever saved
pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<Preferences>, AppError> {
    let preferences = state.db.get_preferences(&owner.owner_id)?;
    Ok(Json(preferences))
}

/// POST /api/preferences - Save the owner's preferences, replacing any
/// previous state
pub async fn save_preferences(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewPreferences>,
) -> Result<Json<Preferences>, AppError> {
    let preferences = state.db.upsert_preferences(&new)?;
    Ok(Json(preferences))
}
