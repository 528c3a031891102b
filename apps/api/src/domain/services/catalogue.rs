use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::course::Course;
use crate::domain::repositories::{CourseRepository, RepositoryError};

/// Errors from course queries and creation
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("{0}")]
    Validation(String),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Plain course reads and inserts
pub struct CatalogueService {
    courses: Arc<dyn CourseRepository>,
}

impl CatalogueService {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    /// All courses, oldest first
    pub async fn list_courses(&self) -> Result<Vec<Course>, CatalogueError> {
        Ok(self.courses.list().await?)
    }

    /// Fetches one course; an unparseable id is reported as not found
    pub async fn get_course(&self, id: &str) -> Result<Course, CatalogueError> {
        let course_id =
            parse_course_id(id).ok_or_else(|| CatalogueError::CourseNotFound(id.to_string()))?;

        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| CatalogueError::CourseNotFound(id.to_string()))
    }

    /// Creates a course and returns it with its generated id
    pub async fn add_course(
        &self,
        title: &str,
        description: &str,
    ) -> Result<Course, CatalogueError> {
        let course = Course::new(title, description).map_err(CatalogueError::Validation)?;
        self.courses.create(&course).await?;

        tracing::info!(course_id = %course.id(), title = course.title(), "course added");
        Ok(course)
    }
}

/// Parses a course id from a path segment
pub fn parse_course_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
