use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::course::Course;
use crate::domain::repositories::{
    CourseRepository, RepositoryError, RepositoryResult, User, UserRepository,
};
use crate::domain::user::value_objects::{Email, Username};

fn read<T>(lock: &RwLock<T>) -> RepositoryResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| RepositoryError::Database("in-memory store lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> RepositoryResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| RepositoryError::Database("in-memory store lock poisoned".to_string()))
}

/// In-memory user store
///
/// Intended for tests/dev. Enforces the same uniqueness rules as the
/// `users` table.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> RepositoryResult<Uuid> {
        let mut users = write(&self.users)?;

        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(RepositoryError::Conflict(format!(
                "user {} or email {} already exists",
                user.username, user.email
            )));
        }

        let id = user.id;
        users.push(user);
        Ok(id)
    }

    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<User>> {
        Ok(read(&self.users)?.iter().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> RepositoryResult<bool> {
        Ok(read(&self.users)?
            .iter()
            .any(|u| u.username.as_str() == username))
    }

    async fn exists_by_username_or_email(
        &self,
        username: &Username,
        email: &Email,
    ) -> RepositoryResult<bool> {
        Ok(read(&self.users)?
            .iter()
            .any(|u| &u.username == username || &u.email == email))
    }
}

#[derive(Debug, Default)]
struct CourseStore {
    /// Insertion order doubles as creation order
    courses: Vec<Course>,
    enrollments: HashSet<(Uuid, String)>,
}

/// In-memory course and enrollment store
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryCourseRepository {
    store: RwLock<CourseStore>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of usernames enrolled in a course
    pub fn enrollment_count(&self, course_id: Uuid) -> usize {
        self.store
            .read()
            .map(|store| {
                store
                    .enrollments
                    .iter()
                    .filter(|(id, _)| *id == course_id)
                    .count()
            })
            .unwrap_or(0)
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn create(&self, course: &Course) -> RepositoryResult<Uuid> {
        let mut store = write(&self.store)?;

        if store.courses.iter().any(|c| c.id() == course.id()) {
            return Err(RepositoryError::Conflict(format!(
                "course {} already exists",
                course.id()
            )));
        }

        store.courses.push(course.clone());
        Ok(course.id())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Course>> {
        Ok(read(&self.store)?
            .courses
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }

    async fn list(&self) -> RepositoryResult<Vec<Course>> {
        Ok(read(&self.store)?.courses.clone())
    }

    async fn exists(&self, id: Uuid) -> RepositoryResult<bool> {
        Ok(read(&self.store)?.courses.iter().any(|c| c.id() == id))
    }

    async fn is_enrolled(&self, course_id: Uuid, username: &str) -> RepositoryResult<bool> {
        Ok(read(&self.store)?
            .enrollments
            .contains(&(course_id, username.to_string())))
    }

    async fn add_enrollment(&self, course_id: Uuid, username: &str) -> RepositoryResult<bool> {
        let mut store = write(&self.store)?;
        if !store.courses.iter().any(|c| c.id() == course_id) {
            return Err(RepositoryError::Database(format!(
                "course {} does not exist",
                course_id
            )));
        }

        Ok(store.enrollments.insert((course_id, username.to_string())))
    }

    async fn remove_enrollment(&self, course_id: Uuid, username: &str) -> RepositoryResult<bool> {
        Ok(write(&self.store)?
            .enrollments
            .remove(&(course_id, username.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: Username::new(username).unwrap(),
            email: Email::new(email).unwrap(),
            password_hash: "$2b$04$hash".to_string(),
        }
    }

    #[tokio::test]
    async fn user_create_and_find_by_email() {
        let repo = InMemoryUserRepository::new();
        let ada = user("ada", "ada@example.com");

        let id = repo.create(ada.clone()).await.unwrap();
        assert_eq!(id, ada.id);

        let found = repo
            .find_by_email(&Email::new("ada@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(found, Some(ada));
    }

    #[tokio::test]
    async fn user_duplicates_conflict() {
        let repo = InMemoryUserRepository::new();
        repo.create(user("ada", "ada@example.com")).await.unwrap();

        let same_name = repo.create(user("ada", "other@example.com")).await;
        let same_email = repo.create(user("grace", "ada@example.com")).await;

        assert!(matches!(same_name, Err(RepositoryError::Conflict(_))));
        assert!(matches!(same_email, Err(RepositoryError::Conflict(_))));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn user_existence_checks() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.is_empty());
        repo.create(user("ada", "ada@example.com")).await.unwrap();

        assert!(repo.exists_by_username("ada").await.unwrap());
        assert!(!repo.exists_by_username("grace").await.unwrap());
        assert!(repo
            .exists_by_username_or_email(
                &Username::new("grace").unwrap(),
                &Email::new("ada@example.com").unwrap()
            )
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn enrollment_has_no_duplicates() {
        let repo = InMemoryCourseRepository::new();
        let course = Course::new("Rust", "").unwrap();
        repo.create(&course).await.unwrap();

        assert!(repo.add_enrollment(course.id(), "ada").await.unwrap());
        assert!(!repo.add_enrollment(course.id(), "ada").await.unwrap());
        assert_eq!(repo.enrollment_count(course.id()), 1);

        assert!(repo.remove_enrollment(course.id(), "ada").await.unwrap());
        assert!(!repo.remove_enrollment(course.id(), "ada").await.unwrap());
        assert_eq!(repo.enrollment_count(course.id()), 0);
    }

    #[tokio::test]
    async fn enrollment_requires_existing_course() {
        let repo = InMemoryCourseRepository::new();
        let result = repo.add_enrollment(Uuid::new_v4(), "ada").await;
        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }
}
