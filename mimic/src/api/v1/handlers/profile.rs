//! v1 Profile handlers.

use axum::extract::State;

use crate::api::v1::dto::ProfileResponse;
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// `GET /api/v1/profile`
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "profile",
    operation_id = "profile.get",
    responses(
        (status = 200, description = "Current profile", body = ProfileResponse),
        (status = 401, description = "Missing or unknown API key", body = ApiError),
        (status = 404, description = "No profile trained or loaded", body = ApiError),
    ),
    security(("api_key" = []))
)]
pub async fn get_profile(State(state): State<AppState>) -> ApiResponse<ProfileResponse> {
    match state.clone.profile() {
        Some(profile) => ApiResponse::ok(ProfileResponse::from(profile)),
        None => ApiResponse::error(ErrorCode::NotFound, "No profile has been trained yet"),
    }
}
