//! API key check for the profile-mutating and profile-reading routes.
//!
//! Keys come from `MIMIC_API_KEYS`. With no keys configured the routes stay
//! locked rather than open.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;

use super::response::{ApiResponse, ErrorCode};

/// Why a request carried no usable key.
#[derive(Debug, PartialEq, Eq)]
enum KeyError {
    Missing,
    NotBearer,
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, KeyError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(KeyError::Missing)?
        .to_str()
        .map_err(|_| KeyError::NotBearer)?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(KeyError::NotBearer)
}

fn unauthorized(message: &str) -> Response {
    ApiResponse::<()>::error(ErrorCode::Unauthorized, message).into_response()
}

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let keys = &state.config.server.api_keys;
    if keys.is_empty() {
        return unauthorized("No API keys configured; set MIMIC_API_KEYS to train or ask");
    }

    let known = bearer_token(request.headers()).map(|token| keys.iter().any(|key| key == token));
    match known {
        Ok(true) => next.run(request).await,
        Ok(false) => {
            tracing::debug!(path = %request.uri().path(), "Rejected unknown API key");
            unauthorized("Invalid API key")
        }
        Err(KeyError::Missing) => unauthorized("Missing authorization header"),
        Err(KeyError::NotBearer) => {
            unauthorized("Invalid authorization header format. Expected: Bearer <token>")
        }
    }
}
