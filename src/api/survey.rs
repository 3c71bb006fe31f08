//! Survey handlers.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/surveys` | 200 |
//! | POST | `/surveys` | 201 + `Location` |
//! | GET / PUT / DELETE | `/surveys/{id}` | 200 / 200 / 204 |
//! | POST | `/surveys/{id}/publish`, `/surveys/{id}/close` | 204 |
//! | POST | `/surveys/{id}/responses` | 202 |
//! | GET | `/surveys/{id}/analytics` | 200 |

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderName, StatusCode, header},
};

use super::dto::{
    CreateSurveyRequest, SubmitResponseRequest, SurveyAnalyticsResponse, SurveyDetailResponse,
    SurveySummaryResponse, UpdateSurveyRequest,
};
use super::error::ApiErrorResponse;
use super::handlers::{AppState, parse_survey_id};
use crate::service::AnswerSubmission;

/// Response to a successful create: status, `Location` header and body.
pub type CreatedSurvey = (StatusCode, [(HeaderName, String); 1], Json<SurveyDetailResponse>);

/// Lists survey summaries in insertion order.
///
/// # Errors
///
/// - `500 Internal Server Error`: store failure
pub async fn list_surveys(
    State(state): State<AppState>,
) -> Result<Json<Vec<SurveySummaryResponse>>, ApiErrorResponse> {
    let surveys = state.survey_service.list().await?;
    Ok(Json(surveys.iter().map(SurveySummaryResponse::from).collect()))
}

/// Returns one survey with its questions.
///
/// # Errors
///
/// - `400 Bad Request`: malformed id
/// - `404 Not Found`: no such survey
pub async fn get_survey(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
) -> Result<Json<SurveyDetailResponse>, ApiErrorResponse> {
    let id = parse_survey_id(&survey_id)?;
    let survey = state.survey_service.get(id).await?;
    Ok(Json(SurveyDetailResponse::from(&survey)))
}

/// Creates a draft survey.
///
/// # Errors
///
/// - `400 Bad Request`: malformed body or failed validation
pub async fn create_survey(
    State(state): State<AppState>,
    payload: Result<Json<CreateSurveyRequest>, JsonRejection>,
) -> Result<CreatedSurvey, ApiErrorResponse> {
    let Json(request) = payload?;
    let (draft, created_by) = request.into_parts();

    let survey = state.survey_service.create(draft, created_by).await?;
    let location = format!("/surveys/{}", survey.survey_id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(SurveyDetailResponse::from(&survey)),
    ))
}

/// Replaces the content of a draft survey.
///
/// # Errors
///
/// - `400 Bad Request`: malformed id or body, or failed validation
/// - `404 Not Found`: no such survey
/// - `409 Conflict`: survey is not a draft
pub async fn update_survey(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
    payload: Result<Json<UpdateSurveyRequest>, JsonRejection>,
) -> Result<Json<SurveyDetailResponse>, ApiErrorResponse> {
    let id = parse_survey_id(&survey_id)?;
    let Json(request) = payload?;

    let survey = state.survey_service.update(id, request.into()).await?;
    Ok(Json(SurveyDetailResponse::from(&survey)))
}

/// Publishes a draft survey.
///
/// # Errors
///
/// - `404 Not Found`: no such survey
/// - `409 Conflict`: survey is not a draft
pub async fn publish_survey(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id = parse_survey_id(&survey_id)?;
    state.survey_service.publish(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Closes a published survey.
///
/// # Errors
///
/// - `404 Not Found`: no such survey
/// - `409 Conflict`: survey is not published
pub async fn close_survey(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id = parse_survey_id(&survey_id)?;
    state.survey_service.close(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a survey. Deleting a missing survey still succeeds.
///
/// # Errors
///
/// - `400 Bad Request`: malformed id
pub async fn delete_survey(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id = parse_survey_id(&survey_id)?;
    state.survey_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Records an anonymous response.
///
/// # Errors
///
/// - `400 Bad Request`: malformed body or invalid answer
/// - `404 Not Found`: no such survey
/// - `409 Conflict`: survey is not published
pub async fn submit_response(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
    payload: Result<Json<SubmitResponseRequest>, JsonRejection>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id = parse_survey_id(&survey_id)?;
    let Json(request) = payload?;

    let answers = request
        .answers
        .into_iter()
        .map(AnswerSubmission::from)
        .collect();
    state.survey_service.submit_response(id, answers).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Returns per-question and per-option counts.
///
/// # Errors
///
/// - `404 Not Found`: no such survey
pub async fn survey_analytics(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
) -> Result<Json<SurveyAnalyticsResponse>, ApiErrorResponse> {
    let id = parse_survey_id(&survey_id)?;
    let analytics = state
        .survey_service
        .analytics(id)
        .await?
        .ok_or_else(|| ApiErrorResponse::not_found("Survey not found"))?;
    Ok(Json(SurveyAnalyticsResponse::from(analytics)))
}
