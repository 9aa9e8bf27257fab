use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};

use common::{Cohort, Layer};

use super::params::{self, DateQuery};
use crate::{ApiError, AppState};

pub fn calculation_router() -> Router<AppState> {
    Router::new()
        .route("/layer/:layer", get(layer_strength))
        .route("/sector/:sector", get(sector_strength))
}

async fn layer_strength(
    State(state): State<AppState>,
    Path(layer): Path<String>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>, ApiError> {
    let raw = params::required("Layer", &layer)?;
    let layer: Layer = raw.parse().map_err(|_| {
        ApiError::BadRequest("Layer must be one of: BLUECHIP, MIDCAP, PENNY".to_string())
    })?;
    let date = params::trading_date(query.date.as_deref())?;

    let strength = state
        .calculator
        .layer_strength(layer, date)
        .await
        .map_err(ApiError::internal("Failed to calculate layer strength"))?
        .ok_or_else(|| no_data(&Cohort::Layer(layer), date))?;

    Ok(Json(json!({ "success": true, "data": strength })))
}

async fn sector_strength(
    State(state): State<AppState>,
    Path(sector): Path<String>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>, ApiError> {
    let sector = params::required("Sector", &sector)?;
    let date = params::trading_date(query.date.as_deref())?;

    let strength = state
        .calculator
        .sector_strength(sector, date)
        .await
        .map_err(ApiError::internal("Failed to calculate sector strength"))?
        .ok_or_else(|| no_data(&Cohort::sector(sector), date))?;

    Ok(Json(json!({ "success": true, "data": strength })))
}

fn no_data(cohort: &Cohort, date: Option<NaiveDate>) -> ApiError {
    let message = match date {
        Some(date) => format!("No data found for {cohort} on date {date}"),
        None => format!("No data found for {cohort}"),
    };
    ApiError::NotFound(message)
}
