use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use super::deadline::StorageBudget;
use crate::auth::password::MAX_PASSWORD_BYTES;
use crate::auth::{AuthError, PasswordHasher, TokenService};
use crate::domain::repositories::{RepositoryError, User, UserRepository};
use crate::domain::user::value_objects::{Email, Username};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Errors from signup and login
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0}")]
    Validation(String),

    #[error("Username or email already registered")]
    Conflict,

    /// Covers both unknown email and wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// An authenticated user together with a freshly issued token
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Signup and login use cases
///
/// Repository calls share one `storage_timeout` budget per operation;
/// bcrypt work runs outside it.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: PasswordHasher,
    tokens: Arc<TokenService>,
    storage_timeout: Duration,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: PasswordHasher,
        tokens: Arc<TokenService>,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
            storage_timeout,
        }
    }

    /// Registers a new user and issues a token for them
    ///
    /// # Business Rules Enforced
    /// - Username and email must be valid and not already taken
    /// - Password must be at least `MIN_PASSWORD_LEN` characters and at most
    ///   `MAX_PASSWORD_BYTES` bytes
    /// - Only the bcrypt hash is stored
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AccountError> {
        let username = Username::new(username).map_err(AccountError::Validation)?;
        let email = Email::new(email).map_err(AccountError::Validation)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AccountError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AccountError::Validation(format!(
                "Password must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        let mut budget = StorageBudget::new(self.storage_timeout);

        if budget
            .run(self.users.exists_by_username_or_email(&username, &email))
            .await?
        {
            tracing::info!(username = %username, "signup rejected: username or email taken");
            return Err(AccountError::Conflict);
        }

        let password_hash = self.hash_blocking(password.to_string()).await?;

        let user = User {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
        };

        // A concurrent signup can still win the race between the check and
        // the insert; the unique constraints catch it here.
        match budget.run(self.users.create(user.clone())).await {
            Ok(_) => {}
            Err(RepositoryError::Conflict(_)) => return Err(AccountError::Conflict),
            Err(e) => return Err(e.into()),
        }

        let token = self.tokens.issue(user.username.as_str())?;
        tracing::info!(user_id = %user.id, username = %user.username, "user signed up");

        Ok(Session { user, token })
    }

    /// Authenticates by email and password
    ///
    /// Unknown email and wrong password both yield
    /// `AccountError::InvalidCredentials` after the same amount of bcrypt work.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AccountError> {
        let email = Email::new(email).map_err(AccountError::Validation)?;

        let user = StorageBudget::new(self.storage_timeout)
            .run(self.users.find_by_email(&email))
            .await?;

        let hasher = self.passwords.clone();
        let password = password.to_string();
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let valid = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => hasher.verify(&password, &hash),
            None => Ok(hasher.verify_absent(&password)),
        })
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))??;

        let user = match user {
            Some(user) if valid => user,
            _ => {
                tracing::warn!("login rejected: invalid credentials");
                return Err(AccountError::InvalidCredentials);
            }
        };

        let token = self.tokens.issue(user.username.as_str())?;
        tracing::info!(user_id = %user.id, username = %user.username, "user logged in");

        Ok(Session { user, token })
    }

    async fn hash_blocking(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.passwords.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }
}
