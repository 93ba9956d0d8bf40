//! Authentication API endpoints
//!
//! Registration and credential login. Tokens are issued upstream; login only
//! confirms the credentials.

use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::api::user::UserResponse;
use crate::domain::auth::{LoginOutcome, RegisterOutcome};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Email/password pair
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .field("password", &"[hidden]")
            .finish()
    }
}

/// Successful register/login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Register a new account
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let outcome = state
        .auth_service
        .register(&request.email, &request.password)
        .await?;

    match outcome {
        RegisterOutcome::Registered(user) => Ok(Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from_user(&user),
        })),
        RegisterOutcome::Conflict => {
            debug!("Registration conflict");
            Err(ApiError::bad_request("Email is already registered").with_code("email_taken"))
        }
    }
}

/// Check credentials
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let outcome = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    match outcome {
        LoginOutcome::Authenticated(user) => Ok(Json(AuthResponse {
            message: "Login successful".to_string(),
            user: UserResponse::from_user(&user),
        })),
        LoginOutcome::Unauthorized => Err(ApiError::unauthorized("Invalid email or password")),
    }
}
