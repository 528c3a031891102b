// Password hashing utilities
// Uses bcrypt for salted, cost-parameterised password hashing

use bcrypt::{hash, verify};

use super::errors::{AuthError, AuthResult};

/// Lowest work factor bcrypt accepts
pub const MIN_COST: u32 = 4;

/// Highest work factor bcrypt accepts
pub const MAX_COST: u32 = 31;

/// bcrypt only reads this many bytes of input; longer passwords are refused
/// rather than truncated
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes and verifies passwords with a fixed bcrypt cost
///
/// Holds a hash of a throwaway password so that a login against an unknown
/// account spends the same bcrypt work as a login with a wrong password.
///
/// # Example
/// ```
/// use orkidslearning_api::auth::password::{PasswordHasher, MIN_COST};
///
/// let hasher = PasswordHasher::new(MIN_COST).expect("valid cost");
/// let hash = hasher.hash("my_password").expect("valid hash");
/// assert!(hasher.verify("my_password", &hash).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Creates a hasher using the given bcrypt cost
    ///
    /// # Returns
    /// * `Ok(PasswordHasher)` - If the cost is within bcrypt's range
    /// * `Err(AuthError::Configuration)` - If the cost is out of range
    pub fn new(cost: u32) -> AuthResult<Self> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(AuthError::Configuration(format!(
                "bcrypt cost must be between {} and {}, got {}",
                MIN_COST, MAX_COST, cost
            )));
        }

        let dummy_hash =
            hash("orkids-unused-password", cost).map_err(|e| AuthError::Hashing(e.to_string()))?;

        Ok(Self { cost, dummy_hash })
    }

    /// Returns the configured bcrypt cost
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hashes a plaintext password with a fresh random salt
    ///
    /// Passwords longer than [`MAX_PASSWORD_BYTES`] are an error.
    pub fn hash(&self, password: &str) -> AuthResult<String> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::Hashing(format!(
                "password exceeds {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }

        hash(password, self.cost).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Verifies a plaintext password against a stored bcrypt hash
    ///
    /// # Returns
    /// * `Ok(true)` - Password matches
    /// * `Ok(false)` - Password does not match
    /// * `Err(AuthError::Hashing)` - The stored hash is malformed
    ///
    /// A password over [`MAX_PASSWORD_BYTES`] never matches, even when its
    /// prefix would.
    pub fn verify(&self, password: &str, hash: &str) -> AuthResult<bool> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(self.verify_absent(password));
        }

        verify(password, hash).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Runs one verification against the internal dummy hash
    ///
    /// Always returns `false`; used when no account matched the lookup.
    pub fn verify_absent(&self, password: &str) -> bool {
        let _ = verify(password, &self.dummy_hash);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_COST).expect("valid cost")
    }

    #[test]
    fn hash_and_verify_password() {
        let hasher = hasher();
        let password = "test_password_123";
        let hash = hasher.hash(password).expect("valid hash");

        let valid = hasher.verify(password, &hash).expect("valid verification");
        assert!(valid);
    }

    #[test]
    fn verify_wrong_password() {
        let hasher = hasher();
        let hash = hasher.hash("test_password_123").expect("valid hash");

        let valid = hasher
            .verify("wrong_password", &hash)
            .expect("valid verification");
        assert!(!valid);
    }

    #[test]
    fn hash_different_outputs() {
        let hasher = hasher();
        let password = "test_password_123";
        let hash1 = hasher.hash(password).expect("valid hash");
        let hash2 = hasher.hash(password).expect("valid hash");

        // Hashes should be different due to salt
        assert_ne!(hash1, hash2);

        assert!(hasher.verify(password, &hash1).unwrap());
        assert!(hasher.verify(password, &hash2).unwrap());
    }

    #[test]
    fn hash_never_contains_plaintext() {
        let hasher = hasher();
        let hash = hasher.hash("plaintext-secret").expect("valid hash");

        assert!(!hash.contains("plaintext-secret"));
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn hash_uses_configured_cost() {
        let hasher = hasher();
        let hash = hasher.hash("test_password_123").expect("valid hash");

        assert_eq!(hasher.cost(), MIN_COST);
        assert!(hash.contains("$04$"));
    }

    #[test]
    fn cost_out_of_range_rejected() {
        assert!(matches!(
            PasswordHasher::new(3),
            Err(AuthError::Configuration(_))
        ));
        assert!(matches!(
            PasswordHasher::new(32),
            Err(AuthError::Configuration(_))
        ));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let hasher = hasher();
        assert!(hasher.verify("password", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn overlong_password_cannot_be_hashed() {
        let hasher = hasher();
        let password = "a".repeat(MAX_PASSWORD_BYTES + 1);

        assert!(matches!(hasher.hash(&password), Err(AuthError::Hashing(_))));
        assert!(hasher.hash(&"a".repeat(MAX_PASSWORD_BYTES)).is_ok());
    }

    #[test]
    fn shared_72_byte_prefix_does_not_verify() {
        let hasher = hasher();
        let prefix = "a".repeat(MAX_PASSWORD_BYTES);
        let hash = hasher.hash(&prefix).expect("valid hash");

        assert!(hasher.verify(&prefix, &hash).unwrap());
        assert!(!hasher
            .verify(&format!("{}WRONG-SUFFIX", prefix), &hash)
            .unwrap());
    }

    #[test]
    fn verify_absent_is_always_false() {
        let hasher = hasher();
        assert!(!hasher.verify_absent("orkids-unused-password-guess"));
        assert!(!hasher.verify_absent(""));
    }
}
