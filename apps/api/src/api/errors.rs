use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::auth::AuthError;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::{AccountError, CatalogueError, EnrollmentError};

/// API error type with HTTP status code, message and detail
///
/// Serialised as `{"message": ..., "error": ...}`. Server-side failures
/// carry a generic detail; the underlying cause is logged, not returned.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: String,
}

impl ApiError {
    /// Creates a new API error whose detail repeats the message
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status,
            detail: message.clone(),
            message,
        }
    }

    /// Replaces the error detail
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 401 Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 409 Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// 500 for storage failures; logs the cause and hides it from the client
    pub fn storage(cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "storage failure");
        Self::internal_server_error("Internal server error").with_detail("storage failure")
    }

    /// 500 when the request's storage deadline elapses
    pub fn timeout() -> Self {
        tracing::error!("storage deadline exceeded");
        Self::internal_server_error("Internal server error").with_detail("storage timeout")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "message": self.message,
            "error": self.detail,
        }));

        (self.status, body).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Conflict(detail) => {
                ApiError::conflict("Resource already exists").with_detail(detail)
            }
            RepositoryError::Database(cause) => ApiError::storage(cause),
            RepositoryError::Timeout => ApiError::timeout(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidToken(_)
            | AuthError::TokenExpired
            | AuthError::UnexpectedAlgorithm(_) => {
                tracing::warn!(reason = %error, "rejected bearer token");
                ApiError::unauthorized("Unauthorized").with_detail(error.to_string())
            }
            AuthError::Hashing(_) | AuthError::TokenCreation(_) | AuthError::Configuration(_) => {
                tracing::error!(error = %error, "credential processing failed");
                ApiError::internal_server_error("Internal server error")
                    .with_detail("credential processing failed")
            }
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::Validation(detail) => {
                ApiError::bad_request("Invalid request").with_detail(detail)
            }
            AccountError::Conflict => {
                ApiError::conflict("Failed to add user").with_detail(error.to_string())
            }
            AccountError::InvalidCredentials => {
                ApiError::unauthorized("Failed to login user").with_detail(error.to_string())
            }
            AccountError::Auth(e) => e.into(),
            AccountError::Repository(e) => e.into(),
        }
    }
}

impl From<CatalogueError> for ApiError {
    fn from(error: CatalogueError) -> Self {
        match error {
            CatalogueError::Validation(detail) => {
                ApiError::bad_request("Invalid request").with_detail(detail)
            }
            CatalogueError::CourseNotFound(_) => {
                ApiError::not_found("Course not found").with_detail(error.to_string())
            }
            CatalogueError::Repository(e) => e.into(),
        }
    }
}

impl From<EnrollmentError> for ApiError {
    fn from(error: EnrollmentError) -> Self {
        match error {
            EnrollmentError::Validation(detail) => {
                ApiError::bad_request("Invalid request").with_detail(detail)
            }
            EnrollmentError::UserNotFound(_) => {
                ApiError::not_found("User not found").with_detail(error.to_string())
            }
            EnrollmentError::CourseNotFound(_) => {
                ApiError::not_found("Course not found").with_detail(error.to_string())
            }
            EnrollmentError::Repository(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (AccountError::Validation("x".into()).into(), StatusCode::BAD_REQUEST),
            (AccountError::Conflict.into(), StatusCode::CONFLICT),
            (AccountError::InvalidCredentials.into(), StatusCode::UNAUTHORIZED),
            (AuthError::TokenExpired.into(), StatusCode::UNAUTHORIZED),
            (
                AuthError::UnexpectedAlgorithm("HS384".into()).into(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AuthError::Hashing("boom".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CatalogueError::CourseNotFound("x".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                EnrollmentError::UserNotFound("ada".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                EnrollmentError::CourseNotFound("x".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                RepositoryError::Database("connection refused".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (RepositoryError::Timeout.into(), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status, expected, "{:?}", error);
        }
    }

    #[test]
    fn storage_errors_hide_cause() {
        let error: ApiError = RepositoryError::Database("password=hunter2 host=db".into()).into();

        assert_eq!(error.detail, "storage failure");
        assert!(!error.message.contains("hunter2"));
    }

    #[test]
    fn storage_timeout_detail() {
        let error: ApiError = AccountError::Repository(RepositoryError::Timeout).into();

        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.detail, "storage timeout");
    }

    #[tokio::test]
    async fn response_body_shape() {
        let response = ApiError::not_found("Course not found")
            .with_detail("Course not found: abc")
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Course not found");
        assert_eq!(json["error"], "Course not found: abc");
    }
}
