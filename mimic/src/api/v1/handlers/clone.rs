//! v1 Clone handlers: training and answering.

use axum::extract::State;

use crate::api::extractors::AppJson;
use crate::api::v1::dto::{AskRequest, AskResponse, TrainRequest, TrainResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// `POST /api/v1/clone:train`
///
/// Replaces the current profile with one trained on the given posts and
/// persists it. An empty post list is accepted and yields an empty profile.
#[utoipa::path(
    post,
    path = "/api/v1/clone:train",
    tag = "clone",
    operation_id = "clone.train",
    request_body = TrainRequest,
    responses(
        (status = 201, description = "Profile trained", body = TrainResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "Missing or unknown API key", body = ApiError),
        (status = 413, description = "Corpus exceeds MIMIC_MAX_BODY_BYTES", body = ApiError),
        (status = 500, description = "Profile could not be persisted", body = ApiError),
    ),
    security(("api_key" = []))
)]
pub async fn train(
    State(state): State<AppState>,
    AppJson(req): AppJson<TrainRequest>,
) -> ApiResponse<TrainResponse> {
    match state.clone.train(&req.posts).await {
        Ok(report) => ApiResponse::created(TrainResponse::from(report)),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/clone:ask`
///
/// Always answers with a string once the question is non-empty; an untrained
/// profile or a failed generation yields a fixed fallback sentence.
#[utoipa::path(
    post,
    path = "/api/v1/clone:ask",
    tag = "clone",
    operation_id = "clone.ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Personalized answer", body = AskResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 401, description = "Missing or unknown API key", body = ApiError),
    ),
    security(("api_key" = []))
)]
pub async fn ask(
    State(state): State<AppState>,
    AppJson(req): AppJson<AskRequest>,
) -> ApiResponse<AskResponse> {
    if req.question.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Question cannot be empty");
    }

    let response = state.clone.ask(&req.question).await;
    ApiResponse::ok(AskResponse { response })
}
