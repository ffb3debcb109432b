//! Spending analytics handlers
//!
//! Each endpoint loads the owner's ledger and hands it to a pure reducer
//! in the core crate.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use paisa_core::analytics::{
    self, BehaviourReport, DailySpend, DashboardSummary, MerchantSummary,
};

use super::OwnerQuery;

/// GET /api/analytics/dashboard - Ledger totals, category breakdown and
/// regret figures
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<DashboardSummary>, AppError> {
    let expenses = state.db.all_expenses(&owner.owner_id)?;
    let income = state.db.all_income(&owner.owner_id)?;
    let subscriptions = state.db.list_subscriptions(&owner.owner_id)?;

    Ok(Json(analytics::dashboard_summary(
        &expenses,
        &income,
        &subscriptions,
    )))
}

/// Query parameters for the spending trend
#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub owner_id: String,
    /// Trailing window in days
    #[serde(default = "default_trend_days")]
    pub days: usize,
}

fn default_trend_days() -> usize {
    30
}

#[derive(Serialize)]
pub struct TrendResponse {
    pub daily_spending: Vec<DailySpend>,
}

/// GET /api/analytics/trends - Daily spending totals over the trailing
/// window, oldest first
pub async fn get_trends(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendQuery>,
) -> Result<Json<TrendResponse>, AppError> {
    let expenses = state.db.all_expenses(&params.owner_id)?;
    let daily_spending = analytics::daily_trend(&expenses, params.days);

    Ok(Json(TrendResponse { daily_spending }))
}

/// GET /api/analytics/behaviour - Timing patterns and the alerts they
/// trigger
pub async fn get_behaviour(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<BehaviourReport>, AppError> {
    let expenses = state.db.all_expenses(&owner.owner_id)?;
    Ok(Json(analytics::behaviour_report(&expenses)))
}

#[derive(Serialize)]
pub struct MerchantsResponse {
    pub merchants: Vec<MerchantSummary>,
}

/// GET /api/analytics/merchants - Per-merchant spending, heaviest first
pub async fn get_merchants(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<MerchantsResponse>, AppError> {
    let expenses = state.db.all_expenses(&owner.owner_id)?;
    let merchants = analytics::merchant_insights(&expenses);

    Ok(Json(MerchantsResponse { merchants }))
}

/// GET /api/analytics/categories/:category - Month-by-month view of one
/// category's spending
pub async fn get_category_insights(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let expenses = state.db.expenses_by_category(&owner.owner_id, &category)?;

    let body = match analytics::category_insights(&category, &expenses) {
        Some(insights) => serde_json::json!(insights),
        None => serde_json::json!({ "message": "No data for this category" }),
    };

    Ok(Json(body))
}
