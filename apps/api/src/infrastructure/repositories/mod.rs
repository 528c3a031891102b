// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory;
pub mod pg_errors;
pub mod postgres_course_repository;
pub mod postgres_user_repository;

pub use in_memory::{InMemoryCourseRepository, InMemoryUserRepository};
pub use postgres_course_repository::PostgresCourseRepository;
pub use postgres_user_repository::PostgresUserRepository;
