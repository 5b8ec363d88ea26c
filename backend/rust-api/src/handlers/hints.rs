use axum::{extract::Path, http::StatusCode, response::IntoResponse, Json};

use crate::models::hint::HintResponse;
use crate::services::hint_service::{hint_by_name, FALLBACK_HINT};

pub async fn get_hint(Path(concept): Path<String>) -> impl IntoResponse {
    match hint_by_name(&concept) {
        Some((concept, hint)) => (
            StatusCode::OK,
            Json(HintResponse {
                concept: concept.name().to_string(),
                hint: hint.to_string(),
            }),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(HintResponse {
                concept,
                hint: FALLBACK_HINT.to_string(),
            }),
        ),
    }
}
