use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers::{auth, courses};
use crate::api::state::AppState;

/// Builds the application router
///
/// Routes under `/courses` require a bearer token; the `JwtAuth` extractor on
/// each of those handlers enforces it.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(auth::health_check))
        // Public routes
        .route("/public", get(courses::welcome))
        .route("/public/courses", get(courses::list_courses))
        // Auth routes
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        // Protected course routes
        .route("/courses", post(courses::add_course))
        .route("/courses/:id", post(courses::get_course))
        .route("/courses/enroll/:id", post(courses::enroll))
        .route("/courses/unenroll/:id", post(courses::unenroll))
        .with_state(state)
}
