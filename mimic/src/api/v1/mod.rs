pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod router;

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use std::sync::Arc;

    use crate::api::routes::create_router;
    use crate::api::state::test_support::test_state;

    const KEY: &str = "test-key";

    fn app() -> Router {
        create_router(test_state(vec![KEY.to_string()]))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("Authorization", format!("Bearer {KEY}"))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_authed(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("Authorization", format!("Bearer {KEY}"))
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn protected_route_requires_auth() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/clone:ask")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"question":"hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "unauthorized");
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn health_is_public_and_reports_untrained() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json.get("error").is_none());
        assert_eq!(json["data"]["profile"]["status"], "untrained");
        assert_eq!(json["data"]["llm"]["status"], "unavailable");
    }

    #[tokio::test]
    async fn openapi_json_is_public_and_valid() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let version = json["openapi"]
            .as_str()
            .expect("openapi field should be a string");
        assert!(version.starts_with('3'), "got: {version}");
        assert!(json["paths"].get("/api/v1/clone:ask").is_some());
    }

    #[tokio::test]
    async fn ask_before_training_returns_fallback() {
        let response = app()
            .oneshot(post_json("/api/v1/clone:ask", r#"{"question":"nasılsın?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json["data"]["response"],
            crate::services::INSUFFICIENT_DATA_RESPONSE
        );
    }

    #[tokio::test]
    async fn blank_question_is_rejected() {
        let response = app()
            .oneshot(post_json("/api/v1/clone:ask", r#"{"question":"   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn missing_field_is_an_envelope_error() {
        let response = app()
            .oneshot(post_json("/api/v1/clone:ask", r#"{}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "invalid_request");
        assert_eq!(
            json["error"]["message"],
            "Missing required field: question"
        );
    }

    #[tokio::test]
    async fn health_reports_why_drafting_is_unavailable() {
        let response = app()
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["data"]["llm"]["reason"], "LLM_MODEL is not set");
        assert!(json["data"]["llm"].get("endpoint").is_none());
        assert_eq!(json["data"]["profile"]["cachedResponses"], 0);
    }

    #[tokio::test]
    async fn oversized_corpus_is_payload_too_large() {
        let mut state = test_state(vec![KEY.to_string()]);
        Arc::make_mut(&mut state.config).server.max_body_bytes = 64;
        let posts: Vec<String> = (0..20)
            .map(|i| format!(r#"{{"content":"gönderi {i}"}}"#))
            .collect();
        let body = format!(r#"{{"posts":[{}]}}"#, posts.join(","));

        let response = create_router(state)
            .oneshot(post_json("/api/v1/clone:train", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "payload_too_large");
    }

    #[tokio::test]
    async fn unknown_route_uses_the_envelope() {
        let response = app().oneshot(get_authed("/api/v2/profile")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn profile_is_not_found_until_trained() {
        let response = app().oneshot(get_authed("/api/v1/profile")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn train_then_ask_and_inspect_profile() {
        let app = app();
        let corpus = r#"{"posts": [
            {"content": "I love sunny days #happy", "likes": 4},
            {"content": "I hate rainy days #sad"}
        ]}"#;

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/clone:train", corpus))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["data"]["posts"], 2);
        assert_eq!(json["data"]["indexedPosts"], 2);
        assert_eq!(json["data"]["positive"], 0.5);
        assert_eq!(json["data"]["negative"], 0.5);

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/clone:ask", r#"{"question":"sunny days?"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let answer = json["data"]["response"].as_str().expect("response string");
        assert!(answer.starts_with("Bence de öyle"));

        let response = app.oneshot(get_authed("/api/v1/profile")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["word_preferences"]["days"], 2);
        assert_eq!(
            json["data"]["personality_vector"]
                .as_array()
                .expect("vector")
                .len(),
            crate::models::PERSONALITY_VECTOR_LEN
        );
    }
}
