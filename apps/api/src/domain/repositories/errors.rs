use thiserror::Error;

/// Errors surfaced by repository implementations
///
/// Absence is not an error at this layer; lookups return `Option`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other storage failure
    #[error("Database error: {0}")]
    Database(String),

    /// The operation's storage deadline elapsed
    #[error("Storage deadline exceeded")]
    Timeout,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
