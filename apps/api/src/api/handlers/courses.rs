use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::middleware::JwtAuth;
use crate::api::state::AppState;
use crate::domain::course::Course;
use crate::domain::services::EnrollmentOutcome;

/// Public view of a course
#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id(),
            title: course.title().to_string(),
            description: course.description().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CoursesResponse {
    pub message: String,
    pub courses: Vec<CourseResponse>,
}

/// Request body for creating a course
#[derive(Debug, Deserialize)]
pub struct AddCourseRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct AddCourseResponse {
    pub message: String,
    pub course: CourseResponse,
    pub added: bool,
}

/// Optional body of a course lookup
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseLookupRequest {
    pub username: Option<String>,
    #[serde(default)]
    pub check_enrollment: bool,
}

#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    pub message: String,
    pub course: CourseResponse,
    pub enrolled: bool,
}

/// Request body for enroll/unenroll
#[derive(Debug, Deserialize)]
pub struct EnrollmentRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollResponse {
    pub message: String,
    pub enrolled: bool,
    pub username: String,
    pub course_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnenrollResponse {
    pub message: String,
    /// True only when a membership was actually removed
    pub unenrolled: bool,
    pub username: String,
    pub course_id: Uuid,
}

/// GET /public
pub async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Orkids Learning API" }))
}

/// List all courses
///
/// GET /public/courses
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<CoursesResponse>, ApiError> {
    let courses = state
        .with_deadline(state.catalogue.list_courses())
        .await?;

    Ok(Json(CoursesResponse {
        message: "Courses retrieved successfully".to_string(),
        courses: courses.iter().map(CourseResponse::from).collect(),
    }))
}

/// Create a course
///
/// POST /courses
pub async fn add_course(
    State(state): State<AppState>,
    JwtAuth(username): JwtAuth,
    ApiJson(req): ApiJson<AddCourseRequest>,
) -> Result<Json<AddCourseResponse>, ApiError> {
    let course = state
        .with_deadline(state.catalogue.add_course(&req.title, &req.description))
        .await?;

    tracing::debug!(%username, course_id = %course.id(), "course created by user");

    Ok(Json(AddCourseResponse {
        message: "Course added successfully".to_string(),
        course: CourseResponse::from(&course),
        added: true,
    }))
}

/// Fetch one course, optionally reporting whether a user is enrolled
///
/// POST /courses/:id
///
/// The body is optional. With `checkEnrollment: true` and no `username`, the
/// caller's own enrollment is checked.
pub async fn get_course(
    State(state): State<AppState>,
    JwtAuth(caller): JwtAuth,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<CourseDetailResponse>, ApiError> {
    let lookup = parse_lookup(&body)?;

    let (course, enrolled) = state
        .with_deadline(async {
            let course = state.catalogue.get_course(&id).await?;

            let enrolled = if lookup.check_enrollment {
                let username = lookup
                    .username
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .unwrap_or(caller.as_str());
                state.enrollment.is_enrolled(username, course.id()).await?
            } else {
                false
            };

            Ok::<_, ApiError>((course, enrolled))
        })
        .await?;

    Ok(Json(CourseDetailResponse {
        message: "Course retrieved successfully".to_string(),
        course: CourseResponse::from(&course),
        enrolled,
    }))
}

/// Enroll a user in a course
///
/// POST /courses/enroll/:id
pub async fn enroll(
    State(state): State<AppState>,
    JwtAuth(_caller): JwtAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<EnrollmentRequest>,
) -> Result<Json<EnrollResponse>, ApiError> {
    let outcome = state
        .with_deadline(state.enrollment.enroll(&req.username, &id))
        .await?;

    let message = if outcome.changed {
        "Enrolled in course"
    } else {
        "Already enrolled in course"
    };

    Ok(Json(EnrollResponse {
        message: message.to_string(),
        enrolled: outcome.enrolled,
        username: outcome.username,
        course_id: outcome.course_id,
    }))
}

/// Remove a user from a course
///
/// POST /courses/unenroll/:id
pub async fn unenroll(
    State(state): State<AppState>,
    JwtAuth(_caller): JwtAuth,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<EnrollmentRequest>,
) -> Result<Json<UnenrollResponse>, ApiError> {
    let EnrollmentOutcome {
        username,
        course_id,
        changed,
        ..
    } = state
        .with_deadline(state.enrollment.unenroll(&req.username, &id))
        .await?;

    let message = if changed {
        "Unenrolled from course"
    } else {
        "Not enrolled in course"
    };

    Ok(Json(UnenrollResponse {
        message: message.to_string(),
        unenrolled: changed,
        username,
        course_id,
    }))
}

/// An empty or whitespace-only body means "no options"
fn parse_lookup(body: &[u8]) -> Result<CourseLookupRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CourseLookupRequest::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request("Invalid request body").with_detail(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lookup_body_means_defaults() {
        let lookup = parse_lookup(b"").unwrap();
        assert!(!lookup.check_enrollment);
        assert!(lookup.username.is_none());

        assert!(!parse_lookup(b"  \n").unwrap().check_enrollment);
    }

    #[test]
    fn lookup_body_uses_camel_case() {
        let lookup = parse_lookup(br#"{"username":"ada","checkEnrollment":true}"#).unwrap();
        assert!(lookup.check_enrollment);
        assert_eq!(lookup.username.as_deref(), Some("ada"));
    }

    #[test]
    fn malformed_lookup_body_is_bad_request() {
        let error = parse_lookup(b"{not json").unwrap_err();
        assert_eq!(error.status, axum::http::StatusCode::BAD_REQUEST);
    }
}
