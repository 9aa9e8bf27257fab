mod calculation;
mod health;
mod index;
mod market;
mod params;

use axum::http::{Method, Uri};

use crate::ApiError;

pub use calculation::calculation_router;
pub use health::health_router;
pub use index::index_router;
pub use market::market_router;

/// Fallback for any unmatched path.
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route {method} {} not found", uri.path()))
}
