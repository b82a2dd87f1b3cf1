//! User API endpoints
//!
//! - GET /users - List users
//! - POST /users - Create a user

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;

use super::common::{missing_fields, present};
use super::error::ApiError;
use super::extract::ApiJson;
use super::middleware::AppState;
use super::responses::{Envelope, UserResponse};
use crate::models::CreateUserInput;

/// Request body for POST /users
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(list_users_handler).post(create_user_handler))
}

/// GET /users
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<UserResponse>>>, ApiError> {
    let users = state.user_service.list().await?;
    Ok(Json(Envelope::ok(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// POST /users
///
/// Fails with 400 if email or password is missing, or the email is taken.
pub async fn create_user_handler(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateUserRequest>,
) -> Result<Json<Envelope<UserResponse>>, ApiError> {
    let (Some(email), Some(password)) = (present(body.email), present(body.password)) else {
        return Err(missing_fields());
    };

    let user = state
        .user_service
        .create(CreateUserInput::new(email, password))
        .await?;

    Ok(Json(Envelope::ok(user.into())))
}
