//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod survey;
pub mod user;

use axum::Router;
use axum::routing::{get, post};

pub use error::{ApiError, ApiErrorResponse};
pub use handlers::{AppState, HealthResponse, health_check};
pub use survey::{
    close_survey, create_survey, delete_survey, get_survey, list_surveys, publish_survey,
    submit_response, survey_analytics, update_survey,
};
pub use user::{create_user, list_users};

/// Builds the application router without middleware layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/surveys", get(list_surveys).post(create_survey))
        .route(
            "/surveys/{id}",
            get(get_survey).put(update_survey).delete(delete_survey),
        )
        .route("/surveys/{id}/publish", post(publish_survey))
        .route("/surveys/{id}/close", post(close_survey))
        .route("/surveys/{id}/responses", post(submit_response))
        .route("/surveys/{id}/analytics", get(survey_analytics))
        .route("/users", get(list_users).post(create_user))
        .with_state(state)
}
