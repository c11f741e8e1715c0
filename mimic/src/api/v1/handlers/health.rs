use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::v1::response::ApiResponse;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub version: String,
    pub profile: ProfileStatus,
    pub llm: LlmStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProfileReadiness {
    /// Trained on at least one post.
    Ready,
    /// Trained on an empty corpus; every answer is the fallback.
    Empty,
    Untrained,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStatus {
    pub status: ProfileReadiness,
    pub cached_responses: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LlmReadiness {
    Available,
    Unavailable,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LlmStatus {
    pub status: LlmReadiness,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Why answers fall back to the apology sentence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// `GET /api/v1/health`
///
/// Public. Reports whether a profile is loaded and whether drafting works,
/// so operators can tell a fallback answer from a real one.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    operation_id = "health.get",
    responses(
        (status = 200, description = "Profile and drafting status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let readiness = match state.clone.profile() {
        Some(profile) if profile.has_data() => ProfileReadiness::Ready,
        Some(_) => ProfileReadiness::Empty,
        None => ProfileReadiness::Untrained,
    };

    let llm = LlmStatus {
        status: if state.llm.is_available() {
            LlmReadiness::Available
        } else {
            LlmReadiness::Unavailable
        },
        endpoint: state.llm.endpoint().map(|e| e.name().to_string()),
        model: state.llm.model().map(str::to_string),
        reason: state.llm.unavailable_reason().map(str::to_string),
    };

    ApiResponse::ok(HealthData {
        version: env!("CARGO_PKG_VERSION").to_string(),
        profile: ProfileStatus {
            status: readiness,
            cached_responses: state.clone.cached_responses(),
        },
        llm,
    })
}
