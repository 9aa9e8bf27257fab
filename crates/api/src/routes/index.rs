use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::AppState;

pub fn index_router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "FinLens market data API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "market": {
                "latest": "/api/v1/market/latest?limit=50",
                "history": "/api/v1/market/history/{symbol}?days=30",
                "summary": "/api/v1/market/summary",
            },
            "calculation": {
                "layer": "/api/v1/calculation/layer/{layer}?date=YYYY-MM-DD",
                "sector": "/api/v1/calculation/sector/{sector}?date=YYYY-MM-DD",
            },
        },
    }))
}
