//! Subscription handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{AppError, AppState, SuccessResponse};
use paisa_core::analytics::{self, SubscriptionCost};
use paisa_core::models::{NewSubscription, Subscription};

use super::OwnerQuery;

/// POST /api/subscriptions - Register a subscription
pub async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewSubscription>,
) -> Result<Json<Subscription>, AppError> {
    let subscription = state.db.insert_subscription(&new)?;
    Ok(Json(subscription))
}

/// GET /api/subscriptions - List the owner's subscriptions
pub async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<Vec<Subscription>>, AppError> {
    let subscriptions = state.db.list_subscriptions(&owner.owner_id)?;
    Ok(Json(subscriptions))
}

/// DELETE /api/subscriptions/:id - Remove a subscription
pub async fn delete_subscription(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_subscription(&owner.owner_id, &id)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/subscriptions/total - Monthly and yearly cost of the active
/// subscriptions, with yearly plans spread across twelve months
pub async fn subscription_total(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<SubscriptionCost>, AppError> {
    let subscriptions = state.db.list_subscriptions(&owner.owner_id)?;
    Ok(Json(analytics::subscription_cost(&subscriptions)))
}
