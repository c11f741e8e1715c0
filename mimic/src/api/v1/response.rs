//! Envelope shared by every v1 endpoint.
//!
//! Success bodies are `{"data": ...}`, failures are
//! `{"error": {"code": "...", "message": "..."}}`. The status line carries the
//! HTTP meaning; the body never repeats it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::MimicError;

/// Failure classes a client can observe. Generation problems never show up
/// here: `clone:ask` answers them with a fallback sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
    Unauthorized,
    /// No profile has been trained or loaded.
    NotFound,
    /// The training corpus exceeds `MIMIC_MAX_BODY_BYTES`.
    PayloadTooLarge,
    InternalError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    pub code: ErrorCode,
    /// Safe to show to end users; server-side details stay in the logs.
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<MimicError> for ApiError {
    fn from(err: MimicError) -> Self {
        match err {
            MimicError::Validation(msg)
            | MimicError::EmptyCorpus(msg)
            | MimicError::Vectorization(msg) => Self::new(ErrorCode::InvalidRequest, msg),
            MimicError::Json(e) => Self::new(ErrorCode::InvalidRequest, format!("Invalid JSON: {e}")),
            MimicError::BodyTooLarge(msg) => Self::new(ErrorCode::PayloadTooLarge, msg),
            MimicError::Persistence(_) => {
                tracing::error!(error = %err, "Profile storage failed during request");
                Self::new(ErrorCode::InternalError, "The profile could not be saved")
            }
            other => {
                tracing::error!(error = %other, "Unexpected failure during request");
                Self::new(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}

/// A v1 response: payload plus status, or an [`ApiError`].
#[derive(Debug)]
pub enum ApiResponse<T> {
    Data { status: StatusCode, data: T },
    Error(ApiError),
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::Data {
            status: StatusCode::OK,
            data,
        }
    }

    pub fn created(data: T) -> Self {
        Self::Data {
            status: StatusCode::CREATED,
            data,
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error(ApiError::new(code, message))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Data { status, .. } => *status,
            Self::Error(error) => error.code.status(),
        }
    }
}

impl<T> From<MimicError> for ApiResponse<T> {
    fn from(err: MimicError) -> Self {
        Self::Error(err.into())
    }
}

/// Wire shape: serde's external tagging yields `{"data": ..}` or `{"error": ..}`.
#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Envelope<'a, T> {
    Data(&'a T),
    Error(&'a ApiError),
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Data { data, .. } => (status, Json(Envelope::Data(data))).into_response(),
            Self::Error(error) => (status, Json(Envelope::<T>::Error(error))).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn body_json<T: Serialize>(response: ApiResponse<T>) -> (StatusCode, serde_json::Value) {
        let response = response.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[tokio::test]
    async fn data_and_error_bodies_are_exclusive() {
        let (status, json) = body_json(ApiResponse::created(vec!["kahve"])).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json, serde_json::json!({"data": ["kahve"]}));

        let (status, json) =
            body_json(ApiResponse::<()>::error(ErrorCode::NotFound, "No profile")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json,
            serde_json::json!({"error": {"code": "not_found", "message": "No profile"}})
        );
    }

    #[test]
    fn errors_map_to_client_visible_codes() {
        let cases = [
            (MimicError::Validation("bad".into()), ErrorCode::InvalidRequest),
            (MimicError::EmptyCorpus("none".into()), ErrorCode::InvalidRequest),
            (MimicError::BodyTooLarge("9 MiB".into()), ErrorCode::PayloadTooLarge),
            (MimicError::Persistence("disk".into()), ErrorCode::InternalError),
            (MimicError::Generation("timeout".into()), ErrorCode::InternalError),
            (MimicError::LlmUnavailable("none".into()), ErrorCode::InternalError),
        ];
        for (err, code) in cases {
            assert_eq!(ApiError::from(err).code, code);
        }
    }

    #[test]
    fn storage_paths_do_not_leak() {
        let err = ApiError::from(MimicError::Persistence(
            "/var/lib/mimic/clone.json: permission denied".into(),
        ));
        assert_eq!(err.message, "The profile could not be saved");
    }
}
