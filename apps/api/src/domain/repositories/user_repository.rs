use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::user::value_objects::{Email, Username};

/// User data for persistence
///
/// `password_hash` is always a bcrypt hash, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: Username,
    pub email: Email,
    pub password_hash: String,
}

/// Repository trait for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    ///
    /// Fails with `RepositoryError::Conflict` when the username or email is
    /// already taken.
    async fn create(&self, user: User) -> RepositoryResult<Uuid>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<User>>;

    /// Check whether a user with this exact username exists
    async fn exists_by_username(&self, username: &str) -> RepositoryResult<bool>;

    /// Check whether either the username or the email is already taken
    async fn exists_by_username_or_email(
        &self,
        username: &Username,
        email: &Email,
    ) -> RepositoryResult<bool>;
}
