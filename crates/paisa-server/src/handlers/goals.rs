//! Savings goal handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{AppError, AppState};
use paisa_core::analytics::{self, GoalProjection};
use paisa_core::models::{Goal, NewGoal};

use super::OwnerQuery;

/// POST /api/goals - Create a savings goal
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewGoal>,
) -> Result<Json<Goal>, AppError> {
    let goal = state.db.insert_goal(&new)?;
    Ok(Json(goal))
}

/// GET /api/goals - List the owner's goals
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<Vec<Goal>>, AppError> {
    let goals = state.db.list_goals(&owner.owner_id)?;
    Ok(Json(goals))
}

/// Request body for updating a goal's saved amount
#[derive(Debug, Deserialize)]
pub struct UpdateGoalRequest {
    pub current_amount: f64,
}

/// PUT /api/goals/:id - Update how much is saved toward a goal
pub async fn update_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(owner): Query<OwnerQuery>,
    Json(req): Json<UpdateGoalRequest>,
) -> Result<Json<Goal>, AppError> {
    let goal = state
        .db
        .update_goal_amount(&owner.owner_id, &id, req.current_amount)?;
    Ok(Json(goal))
}

/// GET /api/goals/:id/projection - Savings pace needed to hit the goal
/// by its target date
pub async fn get_goal_projection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let goal = state
        .db
        .get_goal(&owner.owner_id, &id)?
        .ok_or_else(|| AppError::not_found("Goal not found"))?;

    let projection = analytics::goal_projection(&goal, Utc::now())?;

    let body = match projection {
        GoalProjection::Expired => serde_json::json!({
            "message": "Target date has passed",
            "days_remaining": 0
        }),
        GoalProjection::OnTrack {
            days_remaining,
            remaining_amount,
            daily_savings_needed,
            monthly_savings_needed,
        } => serde_json::json!({
            "days_remaining": days_remaining,
            "remaining_amount": remaining_amount,
            "daily_savings_needed": daily_savings_needed,
            "monthly_savings_needed": monthly_savings_needed
        }),
    };

    Ok(Json(body))
}
