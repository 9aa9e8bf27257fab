use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use super::params::{self, DaysQuery, LimitQuery};
use crate::{ApiError, AppState};

pub fn market_router() -> Router<AppState> {
    Router::new()
        .route("/latest", get(latest))
        .route("/history/:symbol", get(history))
        .route("/summary", get(summary))
}

async fn latest(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Value>, ApiError> {
    let limit = params::bounded(
        "Limit",
        query.limit.as_deref(),
        params::DEFAULT_LIMIT,
        params::LIMIT_RANGE,
    )?;

    let rows = market::latest_prices(state.store.as_ref(), limit)
        .await
        .map_err(ApiError::internal("Failed to fetch latest prices"))?;

    Ok(Json(json!({ "success": true, "count": rows.len(), "data": rows })))
}

async fn history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<DaysQuery>,
) -> Result<Json<Value>, ApiError> {
    let symbol = params::required("Stock symbol", &symbol)?.to_uppercase();
    let days = params::bounded(
        "Days",
        query.days.as_deref(),
        params::DEFAULT_DAYS,
        params::DAYS_RANGE,
    )?;

    let history = market::stock_history(state.store.as_ref(), &symbol, days)
        .await
        .map_err(ApiError::internal("Failed to fetch stock history"))?
        .ok_or_else(|| ApiError::NotFound(format!("Stock with symbol '{symbol}' not found")))?;

    Ok(Json(json!({ "success": true, "data": history })))
}

async fn summary(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let summary = market::market_summary(state.store.as_ref())
        .await
        .map_err(ApiError::internal("Failed to fetch market summary"))?;

    Ok(Json(json!({ "success": true, "data": summary })))
}
