// Repository ports
// Traits the domain depends on; adapters live in infrastructure

pub mod course_repository;
pub mod errors;
pub mod user_repository;

pub use course_repository::CourseRepository;
pub use errors::{RepositoryError, RepositoryResult};
pub use user_repository::{User, UserRepository};
