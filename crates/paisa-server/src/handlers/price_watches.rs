//! Price watch handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use paisa_core::models::{NewPriceWatch, PriceWatch};

use super::OwnerQuery;

/// POST /api/price-watches - Start watching a product's price. The
/// history is seeded with the initial price.
pub async fn create_price_watch(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewPriceWatch>,
) -> Result<Json<PriceWatch>, AppError> {
    let watch = state.db.insert_price_watch(&new)?;
    Ok(Json(watch))
}

/// GET /api/price-watches - List the owner's price watches
pub async fn list_price_watches(
    State(state): State<Arc<AppState>>,
    Query(owner): Query<OwnerQuery>,
) -> Result<Json<Vec<PriceWatch>>, AppError> {
    let watches = state.db.list_price_watches(&owner.owner_id)?;
    Ok(Json(watches))
}

/// Request body for recording a newly observed price
#[derive(Debug, Deserialize)]
pub struct UpdatePriceRequest {
    pub new_price: f64,
}

/// PUT /api/price-watches/:id/price - Record an observed price, appending
/// it to the watch's history
pub async fn update_price(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(owner): Query<OwnerQuery>,
    Json(req): Json<UpdatePriceRequest>,
) -> Result<Json<PriceWatch>, AppError> {
    let watch = state.db.update_price(&owner.owner_id, &id, req.new_price)?;
    Ok(Json(watch))
}
