use crate::domain::repositories::RepositoryError;

/// Converts a SQLx error into a repository error
///
/// Unique-constraint violations become `Conflict`; everything else is a
/// generic database failure prefixed with `context`.
pub fn map_sqlx_error(context: &str, error: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return RepositoryError::Conflict(format!("{}: {}", context, db_error.message()));
        }
    }

    RepositoryError::Database(format!("{}: {}", context, error))
}
