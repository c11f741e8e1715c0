use std::sync::LazyLock;

use axum::Json;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mimic API",
        version = "1.0.0",
        description = "Trains a writing-style profile from social-media posts and answers questions in the author's voice.",
    ),
    paths(
        handlers::health::health_check,
        handlers::clone::train,
        handlers::clone::ask,
        handlers::profile::get_profile,
    ),
    components(schemas(
        response::ErrorCode,
        response::ApiError,
        dto::clone::TrainRequest,
        dto::clone::TrainResponse,
        dto::clone::WordCount,
        dto::clone::AskRequest,
        dto::clone::AskResponse,
        dto::profile::ProfileResponse,
        handlers::health::HealthData,
        handlers::health::ProfileStatus,
        handlers::health::ProfileReadiness,
        handlers::health::LlmStatus,
        handlers::health::LlmReadiness,
    )),
    tags(
        (name = "health", description = "Profile and drafting status"),
        (name = "clone", description = "Profile training and personalized answers"),
        (name = "profile", description = "Trained profile inspection"),
    ),
    modifiers(&ApiKeyScheme),
)]
pub struct ApiDoc;

/// Declares the `api_key` scheme the protected paths reference.
struct ApiKeyScheme;

impl utoipa::Modify for ApiKeyScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut scheme = Http::new(HttpAuthScheme::Bearer);
        scheme.description = Some("One of the keys listed in MIMIC_API_KEYS".to_string());
        openapi
            .components
            .get_or_insert_with(Default::default)
            .add_security_scheme("api_key", SecurityScheme::Http(scheme));
    }
}

static API_DOC: LazyLock<utoipa::openapi::OpenApi> = LazyLock::new(ApiDoc::openapi);

pub async fn openapi_json() -> Json<&'static utoipa::openapi::OpenApi> {
    Json(&*API_DOC)
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", API_DOC.clone()).into()
}
