// Credential and session-token handling
// Password hashing (bcrypt) and bearer token issuance/validation (JWT)

pub mod errors;
pub mod jwt;
pub mod password;

pub use errors::AuthError;
pub use jwt::{Claims, TokenService};
pub use password::PasswordHasher;
