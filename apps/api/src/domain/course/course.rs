use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Course entity
///
/// A course users can enroll in. Enrollment itself is a membership relation
/// kept by the course repository, not a field of this struct.
///
/// # Invariants
/// - Title cannot be empty (after trimming)
/// - The identifier is generated on creation and never changes
///
/// # Example
/// ```
/// use orkidslearning_api::domain::course::Course;
///
/// let course = Course::new("Intro to Rust", "Ownership and borrowing").expect("valid course");
/// assert_eq!(course.title(), "Intro to Rust");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    id: Uuid,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl Course {
    /// Creates a new Course with a freshly generated identifier
    ///
    /// # Returns
    /// * `Ok(Course)` - New course
    /// * `Err(String)` - If the title is empty
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Result<Self, String> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err("Title cannot be empty".to_string());
        }

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description: description.into(),
            created_at: Utc::now(),
        })
    }

    /// Returns the course's ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the course title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the course description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reconstructs a Course from persistence layer data
    ///
    /// Skips validation; only repository implementations should call this.
    pub fn from_persistence(
        id: Uuid,
        title: String,
        description: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_course_with_valid_title() {
        let course = Course::new("Test course", "A description").unwrap();

        assert_eq!(course.title(), "Test course");
        assert_eq!(course.description(), "A description");
        assert!(!course.id().is_nil());
    }

    #[test]
    fn create_course_with_empty_title_fails() {
        let result = Course::new("", "A description");

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Title cannot be empty"));
    }

    #[test]
    fn whitespace_title_counts_as_empty() {
        assert!(Course::new("   ", "").is_err());
    }

    #[test]
    fn empty_description_allowed() {
        assert!(Course::new("Title", "").is_ok());
    }

    #[test]
    fn each_course_gets_its_own_id() {
        let a = Course::new("A", "").unwrap();
        let b = Course::new("A", "").unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn from_persistence_keeps_fields() {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let course =
            Course::from_persistence(id, "T".to_string(), "D".to_string(), created_at);

        assert_eq!(course.id(), id);
        assert_eq!(course.title(), "T");
        assert_eq!(course.description(), "D");
        assert_eq!(course.created_at(), created_at);
    }
}
