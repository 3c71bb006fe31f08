//! Common test helpers for integration tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

use survey_feedback_api::api::{AppState, router};
use survey_feedback_api::infrastructure::{RepositoryConfig, RepositoryFactory};

// =============================================================================
// AppState Creation Helpers
// =============================================================================

/// Creates an `AppState` over empty in-memory repositories.
pub fn create_test_app_state() -> AppState {
    create_app_state(false)
}

/// Creates an `AppState` whose store holds the example survey.
pub fn create_seeded_app_state() -> AppState {
    create_app_state(true)
}

fn create_app_state(seed: bool) -> AppState {
    let config = RepositoryConfig::builder()
        .seed_example_survey(seed)
        .build()
        .expect("default configuration is valid");
    AppState::new(RepositoryFactory::new(config).create())
}

// =============================================================================
// Router Helpers
// =============================================================================

/// Creates the application router over `state`.
pub fn create_test_router(state: AppState) -> Router {
    router(state)
}

/// Sends one request through the router.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request is well formed");

    app.clone().oneshot(request).await.expect("router is infallible")
}

/// Sends a raw string body with a JSON content type.
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request is well formed");

    app.clone().oneshot(request).await.expect("router is infallible")
}

/// Collects a response body and decodes it as JSON.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body is readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is valid JSON")
}

/// Asserts the status and the `{"error", "status"}` body of an error response.
pub async fn assert_error(response: Response, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    let body: Value = read_json(response).await;
    assert_eq!(body["error"], message);
    assert_eq!(body["status"], status.as_u16());
}

// =============================================================================
// Test Data
// =============================================================================

/// Body for a survey with one single-choice question (Yes/No) and one text
/// question.
pub fn sample_survey_body() -> Value {
    serde_json::json!({
        "title": "Cafeteria",
        "description": "Lunch feedback",
        "questions": [
            {
                "text": "Did you enjoy lunch?",
                "type": "SingleChoice",
                "options": [{"text": "Yes"}, {"text": "No"}]
            },
            {"text": "What should change?", "type": "Text", "options": []}
        ]
    })
}
