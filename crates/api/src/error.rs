use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Store failure. `message` is what the client sees; `source` is only logged.
    #[error("{message}: {source}")]
    Internal {
        message: &'static str,
        #[source]
        source: common::Error,
    },
}

impl ApiError {
    /// Adapter for `map_err` that tags a store failure with a client-facing message.
    pub fn internal(message: &'static str) -> impl FnOnce(common::Error) -> ApiError {
        move |source| ApiError::Internal { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal { message, source } => {
                error!(error = %source, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        let reason = status.canonical_reason().unwrap_or("Error");
        (status, Json(json!({ "error": reason, "message": message }))).into_response()
    }
}
