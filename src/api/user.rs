//! User directory handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use super::dto::{CreateUserRequest, UserResponse};
use super::error::ApiErrorResponse;
use super::handlers::AppState;

/// Creates a user and returns the stored record.
///
/// # Errors
///
/// - `400 Bad Request`: malformed body, blank name or blank email
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiErrorResponse> {
    let Json(request) = payload?;
    let user = state
        .user_service
        .add(&request.name, &request.email)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Lists users, most recently created first.
///
/// # Errors
///
/// - `500 Internal Server Error`: store failure
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiErrorResponse> {
    let users = state.user_service.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
