//! Shared handler plumbing: application state, path parsing and health.

use axum::Json;

use super::error::ApiErrorResponse;
use crate::domain::SurveyId;
use crate::infrastructure::Repositories;
use crate::service::{SurveyService, UserService};

// =============================================================================
// Application State
// =============================================================================

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub survey_service: SurveyService,
    pub user_service: UserService,
}

impl AppState {
    /// Builds the services over the given repositories.
    #[must_use]
    pub fn new(repositories: Repositories) -> Self {
        Self {
            survey_service: SurveyService::new(repositories.survey_repository),
            user_service: UserService::new(repositories.user_repository),
        }
    }
}

/// Parses a survey id taken from the request path.
///
/// # Errors
///
/// Returns a 400 response when `value` is not a UUID.
pub fn parse_survey_id(value: &str) -> Result<SurveyId, ApiErrorResponse> {
    SurveyId::parse(value)
        .map_err(|_| ApiErrorResponse::bad_request(format!("Invalid survey id: '{value}'")))
}

// =============================================================================
// GET /health Handler
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check endpoint.
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
