use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::error::EngineError;
use crate::metrics;

pub mod calculator;
pub mod hints;
pub mod quiz;

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "interest-tutor-api",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

pub async fn metrics_handler() -> impl IntoResponse {
    match metrics::render_metrics() {
        Ok(metrics_text) => (StatusCode::OK, metrics_text),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render metrics: {}", e),
        ),
    }
}

/// Engine errors are caller mistakes, reported as 400.
pub(crate) fn engine_error(e: EngineError) -> (StatusCode, String) {
    tracing::warn!("Rejected request: {}", e);
    (StatusCode::BAD_REQUEST, e.to_string())
}

pub(crate) fn validation_error(e: validator::ValidationErrors) -> (StatusCode, String) {
    tracing::warn!("Request validation failed: {}", e);
    (StatusCode::BAD_REQUEST, e.to_string())
}
