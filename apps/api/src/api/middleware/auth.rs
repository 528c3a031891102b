use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;
use crate::api::state::AppState;

/// JWT authentication extractor for protected routes
///
/// Yields the username the token was issued for.
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     JwtAuth(username): JwtAuth,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello {}", username))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuth(pub String);

#[async_trait]
impl FromRequestParts<AppState> for JwtAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError::unauthorized("Unauthorized").with_detail("Missing authorization header")
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ApiError::unauthorized("Unauthorized")
                    .with_detail("Invalid authorization format. Use: Bearer <token>")
            })?;

        let username = state.tokens.username(token)?;

        Ok(JwtAuth(username))
    }
}
