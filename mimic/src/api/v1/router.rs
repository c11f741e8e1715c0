use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;
use super::middleware::require_api_key;

pub fn v1_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router());

    let protected_routes = Router::new()
        .route("/clone:train", post(handlers::clone::train))
        .route("/clone:ask", post(handlers::clone::ask))
        .route("/profile", get(handlers::profile::get_profile))
        .route_layer(middleware::from_fn_with_state(state, require_api_key));

    Router::new().merge(public_routes).merge(protected_routes)
}
