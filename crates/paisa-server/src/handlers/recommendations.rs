//! Lifestyle recommendation handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::{AppError, AppState};
use paisa_core::analytics::{self, Recommendation};

use super::OwnerQuery;

#[derive(Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}

/// GET /api/recommendations - Rule-based saving suggestions from the
/// owner's spending and subscriptions
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let expenses = state.db.all_expenses(&owner.owner_id)?;
    let subscriptions = state.db.list_subscriptions(&owner.owner_id)?;

    let recommendations = analytics::lifestyle_recommendations(&expenses, &subscriptions);

    Ok(Json(RecommendationsResponse { recommendations }))
}
