//! Periodic report handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, Utc};

use crate::{AppError, AppState};
use paisa_core::analytics::{self, WeeklyReport};

use super::OwnerQuery;

/// GET /api/reports/weekly - Reduce the trailing seven days of activity
/// to a report
pub async fn get_weekly_report(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<WeeklyReport>, AppError> {
    let now = Utc::now();
    let week_ago = (now - Duration::days(7)).to_rfc3339();

    let expenses = state.db.expenses_since(&owner.owner_id, &week_ago)?;
    let income = state.db.income_since(&owner.owner_id, &week_ago)?;

    let week_start = &week_ago[..10];
    let week_end_full = now.to_rfc3339();
    let week_end = &week_end_full[..10];

    Ok(Json(analytics::weekly_report(
        &expenses, &income, week_start, week_end,
    )))
}
