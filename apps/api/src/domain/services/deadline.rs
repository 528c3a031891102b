// Storage deadline shared by the repository calls of one operation

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::domain::repositories::{RepositoryError, RepositoryResult};

/// Time left for the storage calls of one operation
///
/// Only time spent awaiting storage is charged. CPU work between calls,
/// such as password hashing, does not count against it.
#[derive(Debug, Clone, Copy)]
pub struct StorageBudget {
    remaining: Duration,
}

impl StorageBudget {
    pub fn new(limit: Duration) -> Self {
        Self { remaining: limit }
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Runs one storage call, charging its duration to the budget
    ///
    /// Fails with `RepositoryError::Timeout` once the budget is spent.
    pub async fn run<T, F>(&mut self, call: F) -> RepositoryResult<T>
    where
        F: Future<Output = RepositoryResult<T>>,
    {
        let started = Instant::now();
        let result = tokio::time::timeout(self.remaining, call).await;
        self.remaining = self.remaining.saturating_sub(started.elapsed());

        result.map_err(|_| RepositoryError::Timeout)?
    }
}
