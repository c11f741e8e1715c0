use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::v1::response::ApiResponse;

#[derive(Error, Debug)]
pub enum MimicError {
    #[error("Empty corpus: {0}")]
    EmptyCorpus(String),

    #[error("Vectorization error: {0}")]
    Vectorization(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Request body too large: {0}")]
    BodyTooLarge(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("LLM rate limit exceeded, retry after {retry_after:?} seconds")]
    LlmRateLimit { retry_after: Option<u64> },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl MimicError {
    /// True for failures of the external text-generation collaborator.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            MimicError::Generation(_)
                | MimicError::Llm(_)
                | MimicError::LlmUnavailable(_)
                | MimicError::LlmRateLimit { .. }
                | MimicError::Http(_)
        )
    }
}

impl IntoResponse for MimicError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::from(self).into_response()
    }
}

pub type Result<T> = std::result::Result<T, MimicError>;
