use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::models::answer::{SubmitAnswerRequest, SubmitAnswerResponse};
use crate::models::problem::ProblemParameters;
use crate::models::{QuizQuery, QuizResponse};
use crate::services::{hint_service, AppState};

use super::{engine_error, validation_error};

pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(learner_id): Path<String>,
    Query(query): Query<QuizQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let learner = state.learners.load(&learner_id).await;
    let with_choices = query.multiple_choice.unwrap_or(state.config.multiple_choice);

    let problem = {
        let mut rng = rand::rng();
        state
            .assessment
            .next_problem(&learner, with_choices, &mut rng)
            .map_err(engine_error)?
    };

    tracing::info!(
        "Issued level {} problem to learner {}",
        problem.level,
        learner_id
    );

    Ok((StatusCode::OK, Json(QuizResponse::from(problem))))
}

pub async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Path(learner_id): Path<String>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!(
        "Submitting answer for learner {}: answer={}",
        learner_id,
        req.user_answer
    );

    req.validate().map_err(validation_error)?;
    let parameters =
        ProblemParameters::new(req.principal, req.rate, req.time, req.n).map_err(engine_error)?;

    let assessment = state.assessment;
    let graded = state
        .learners
        .record_attempt(&learner_id, |learner| {
            assessment.grade(learner, parameters, req.user_answer)
        })
        .await
        .map_err(engine_error)?;

    let response = SubmitAnswerResponse::new(
        &graded.record,
        graded.computation.steps,
        &graded.state,
        hint_service::all_hints(),
    );

    Ok((StatusCode::OK, Json(response)))
}

pub async fn get_learner(
    State(state): State<Arc<AppState>>,
    Path(learner_id): Path<String>,
) -> impl IntoResponse {
    let learner = state.learners.load(&learner_id).await;
    (StatusCode::OK, Json(learner))
}

pub async fn list_attempts(
    State(state): State<Arc<AppState>>,
    Path(learner_id): Path<String>,
) -> impl IntoResponse {
    let attempts = state.learners.attempts(&learner_id).await;
    (StatusCode::OK, Json(attempts))
}
