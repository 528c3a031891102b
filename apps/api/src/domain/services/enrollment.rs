use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use super::catalogue::parse_course_id;
use crate::domain::repositories::{CourseRepository, RepositoryError, UserRepository};

/// Errors from enroll/unenroll, one per failing step
#[derive(Debug, Error)]
pub enum EnrollmentError {
    #[error("{0}")]
    Validation(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result of an enroll or unenroll request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentOutcome {
    pub username: String,
    pub course_id: Uuid,
    /// Membership after the operation
    pub enrolled: bool,
    /// Whether the membership relation was modified
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Enroll,
    Unenroll,
}

/// Mutates the user/course membership relation
///
/// Both directions are idempotent: enrolling a member or unenrolling a
/// non-member succeeds without touching storage.
pub struct EnrollmentService {
    users: Arc<dyn UserRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl EnrollmentService {
    pub fn new(users: Arc<dyn UserRepository>, courses: Arc<dyn CourseRepository>) -> Self {
        Self { users, courses }
    }

    /// Enrolls a user in a course
    pub async fn enroll(
        &self,
        username: &str,
        course_id: &str,
    ) -> Result<EnrollmentOutcome, EnrollmentError> {
        self.apply(Action::Enroll, username, course_id).await
    }

    /// Removes a user from a course
    pub async fn unenroll(
        &self,
        username: &str,
        course_id: &str,
    ) -> Result<EnrollmentOutcome, EnrollmentError> {
        self.apply(Action::Unenroll, username, course_id).await
    }

    /// Reports whether a user is enrolled in a course
    pub async fn is_enrolled(&self, username: &str, course_id: Uuid) -> Result<bool, EnrollmentError> {
        Ok(self.courses.is_enrolled(course_id, username).await?)
    }

    async fn apply(
        &self,
        action: Action,
        username: &str,
        course_id: &str,
    ) -> Result<EnrollmentOutcome, EnrollmentError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(EnrollmentError::Validation("username is required".to_string()));
        }

        if !self.users.exists_by_username(username).await? {
            return Err(EnrollmentError::UserNotFound(username.to_string()));
        }

        let course_id = match parse_course_id(course_id) {
            Some(id) if self.courses.exists(id).await? => id,
            _ => return Err(EnrollmentError::CourseNotFound(course_id.to_string())),
        };

        let member = self.courses.is_enrolled(course_id, username).await?;

        let changed = match (action, member) {
            (Action::Enroll, false) => self.courses.add_enrollment(course_id, username).await?,
            (Action::Unenroll, true) => {
                self.courses.remove_enrollment(course_id, username).await?
            }
            _ => false,
        };

        let enrolled = match action {
            Action::Enroll => true,
            Action::Unenroll => false,
        };

        tracing::info!(
            username,
            course_id = %course_id,
            action = ?action,
            changed,
            "enrollment updated"
        );

        Ok(EnrollmentOutcome {
            username: username.to_string(),
            course_id,
            enrolled,
            changed,
        })
    }
}
