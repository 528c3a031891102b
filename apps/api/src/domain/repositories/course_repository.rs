use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::course::Course;

/// Repository trait for courses and their enrollment relation
///
/// Implementations must keep enrollment free of duplicates; `add_enrollment`
/// and `remove_enrollment` report whether they changed anything.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert a new course
    async fn create(&self, course: &Course) -> RepositoryResult<Uuid>;

    /// Find a course by its ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Course>>;

    /// All courses, oldest first
    async fn list(&self) -> RepositoryResult<Vec<Course>>;

    /// Check whether a course exists
    async fn exists(&self, id: Uuid) -> RepositoryResult<bool>;

    /// Check whether a username is enrolled in a course
    async fn is_enrolled(&self, course_id: Uuid, username: &str) -> RepositoryResult<bool>;

    /// Add a username to a course; `false` if it was already enrolled
    async fn add_enrollment(&self, course_id: Uuid, username: &str) -> RepositoryResult<bool>;

    /// Remove a username from a course; `false` if it was not enrolled
    async fn remove_enrollment(&self, course_id: Uuid, username: &str) -> RepositoryResult<bool>;
}
