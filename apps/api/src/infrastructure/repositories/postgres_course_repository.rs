use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::pg_errors::map_sqlx_error;
use crate::domain::course::Course;
use crate::domain::repositories::{CourseRepository, RepositoryResult};

#[derive(Debug, FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(r: CourseRow) -> Self {
        Course::from_persistence(r.id, r.title, r.description, r.created_at)
    }
}

/// PostgreSQL implementation of CourseRepository
///
/// Enrollment lives in `course_enrollments`, whose primary key on
/// `(course_id, username)` keeps membership free of duplicates even when two
/// requests race past the existence check.
#[derive(Clone)]
pub struct PostgresCourseRepository {
    pool: PgPool,
}

impl PostgresCourseRepository {
    /// Creates a new PostgresCourseRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    async fn create(&self, course: &Course) -> RepositoryResult<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO courses (id, title, description, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(course.id())
        .bind(course.title())
        .bind(course.description())
        .bind(course.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create course", e))?;

        Ok(course.id())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, title, description, created_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to find course by id", e))?;

        Ok(row.map(Course::from))
    }

    async fn list(&self) -> RepositoryResult<Vec<Course>> {
        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, title, description, created_at
            FROM courses
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to list courses", e))?;

        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn exists(&self, id: Uuid) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM courses WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to check course", e))
    }

    async fn is_enrolled(&self, course_id: Uuid, username: &str) -> RepositoryResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM course_enrollments
                WHERE course_id = $1 AND username = $2
            )
            "#,
        )
        .bind(course_id)
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to check enrollment", e))
    }

    async fn add_enrollment(&self, course_id: Uuid, username: &str) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO course_enrollments (course_id, username)
            VALUES ($1, $2)
            ON CONFLICT (course_id, username) DO NOTHING
            "#,
        )
        .bind(course_id)
        .bind(username)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to add enrollment", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_enrollment(&self, course_id: Uuid, username: &str) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM course_enrollments
            WHERE course_id = $1 AND username = $2
            "#,
        )
        .bind(course_id)
        .bind(username)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to remove enrollment", e))?;

        Ok(result.rows_affected() > 0)
    }
}
