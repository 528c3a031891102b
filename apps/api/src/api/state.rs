use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::api::errors::ApiError;
use crate::auth::{PasswordHasher, TokenService};
use crate::domain::repositories::{CourseRepository, UserRepository};
use crate::domain::services::{AccountService, CatalogueService, EnrollmentService};

/// Shared per-process state handed to every handler
///
/// Built once by the composition root; everything inside is either
/// immutable or internally synchronised, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub catalogue: Arc<CatalogueService>,
    pub enrollment: Arc<EnrollmentService>,
    pub tokens: Arc<TokenService>,
    pub request_timeout: Duration,
}

impl AppState {
    /// Wires the services on top of the given repositories
    pub fn new(
        users: Arc<dyn UserRepository>,
        courses: Arc<dyn CourseRepository>,
        passwords: PasswordHasher,
        tokens: TokenService,
        request_timeout: Duration,
    ) -> Self {
        let tokens = Arc::new(tokens);

        Self {
            accounts: Arc::new(AccountService::new(
                users.clone(),
                passwords,
                tokens.clone(),
                request_timeout,
            )),
            catalogue: Arc::new(CatalogueService::new(courses.clone())),
            enrollment: Arc::new(EnrollmentService::new(users, courses)),
            tokens,
            request_timeout,
        }
    }

    /// Runs a request's storage work under the per-request deadline
    pub async fn with_deadline<T, E, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<ApiError>,
    {
        match tokio::time::timeout(self.request_timeout, work).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => Err(ApiError::timeout()),
        }
    }
}
