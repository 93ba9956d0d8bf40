//! User profile endpoints

use axum::{extract::State, routing::get, Router};
use serde::Serialize;

use crate::api::middleware::Caller;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::auth::ProfileOutcome;
use crate::domain::user::User;

/// Create the user router
pub fn create_user_router() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile))
}

/// User response (safe to expose)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub created_at: String,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Profile of the calling user
///
/// GET /users/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Caller(context): Caller,
) -> Result<Json<UserResponse>, ApiError> {
    match state.profile_service.get_profile(&context).await? {
        ProfileOutcome::Found(user) => Ok(Json(UserResponse::from_user(&user))),
        ProfileOutcome::Unauthorized => Err(ApiError::unauthorized(
            "Request carries no email identity",
        )),
        ProfileOutcome::NotFound => Err(ApiError::not_found("User not found")),
    }
}
