//! Achievement badge handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use paisa_core::analytics;
use paisa_core::models::Badge;

use super::OwnerQuery;

#[derive(Serialize)]
pub struct BadgesResponse {
    pub badges: Vec<Badge>,
}

/// GET /api/badges - List the owner's earned badges
pub async fn list_badges(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<BadgesResponse>, AppError> {
    let badges = state.db.list_badges(&owner.owner_id)?;
    Ok(Json(BadgesResponse { badges }))
}

/// Request body for a badge eligibility check
#[derive(Debug, Deserialize)]
pub struct CheckBadgesRequest {
    pub owner_id: String,
}

#[derive(Serialize)]
pub struct CheckBadgesResponse {
    pub new_badges: Vec<Badge>,
    pub total_badges: usize,
}

/// POST /api/badges/check - Evaluate eligibility rules and award any
/// badges the owner has newly qualified for. A badge name is never
/// awarded twice.
pub async fn check_badges(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckBadgesRequest>,
) -> Result<Json<CheckBadgesResponse>, AppError> {
    let expenses = state.db.all_expenses(&req.owner_id)?;
    let income = state.db.all_income(&req.owner_id)?;
    let existing = state.db.list_badges(&req.owner_id)?.len();

    let mut new_badges = Vec::new();
    for spec in analytics::eligible_badges(&expenses, &income) {
        if let Some(badge) =
            state
                .db
                .insert_badge_if_absent(&req.owner_id, spec.name, spec.description, spec.icon)?
        {
            new_badges.push(badge);
        }
    }

    Ok(Json(CheckBadgesResponse {
        total_badges: existing + new_badges.len(),
        new_badges,
    }))
}
