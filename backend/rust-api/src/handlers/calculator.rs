use axum::{http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::models::{CalculateRequest, CalculateResponse};
use crate::services::{formula_service, hint_service};

use super::{engine_error, validation_error};

pub async fn calculate(
    Json(req): Json<CalculateRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    req.validate().map_err(validation_error)?;

    let result = formula_service::evaluate_raw(req.principal, req.rate, req.time, req.n)
        .map_err(engine_error)?;

    tracing::info!(
        "Calculated amount {} for P={}, rate={}, t={}, n={}",
        result.amount,
        req.principal,
        req.rate,
        req.time,
        req.n
    );

    Ok((
        StatusCode::OK,
        Json(CalculateResponse {
            amount: result.amount,
            steps: result.steps,
            hints: hint_service::all_hints(),
        }),
    ))
}
