use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::domain::repositories::User;
use crate::domain::services::Session;

/// Request body for user signup
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Always empty; present so clients see a stable shape
    pub password: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.to_string(),
            email: user.email.to_string(),
            password: String::new(),
        }
    }
}

/// Response from successful signup or login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

impl AuthResponse {
    fn new(message: &str, session: Session) -> Self {
        Self {
            message: message.to_string(),
            user: UserResponse::from(&session.user),
            token: session.token,
        }
    }
}

/// Register a new user
///
/// POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    // The account service bounds its own storage calls; hashing is not timed
    let session = state
        .accounts
        .signup(&req.username, &req.email, &req.password)
        .await?;

    Ok(Json(AuthResponse::new("User added successfully", session)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let session = state.accounts.login(&req.email, &req.password).await?;

    Ok(Json(AuthResponse::new("User logged in successfully", session)))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
