// JWT token creation and verification
// Bearer tokens bind a username and an absolute expiry, signed with HS256

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};

use super::errors::{AuthError, AuthResult};

/// The only signing algorithm this service issues or accepts
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (username)
/// * `iat` - Issued-at time (seconds since epoch)
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username (subject)
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch)
    pub iat: usize,
    /// Expiry timestamp (seconds since epoch)
    pub exp: usize,
}

/// Issues and validates signed bearer tokens
///
/// The signing secret and lifetime are fixed at construction; there is no
/// refresh or revocation, expiry is the only lifetime bound.
///
/// # Example
/// ```
/// use chrono::Duration;
/// use orkidslearning_api::auth::jwt::TokenService;
///
/// let tokens = TokenService::new("your-secret-key", Duration::hours(1)).expect("valid secret");
/// let token = tokens.issue("ada").expect("valid token");
///
/// let claims = tokens.validate(&token).expect("valid token");
/// assert_eq!(claims.sub, "ada");
/// ```
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Creates a token service
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing secret (must not be empty)
    /// * `ttl` - Lifetime of issued tokens (must be positive and keep the
    ///   expiry within chrono's date range)
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> AuthResult<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(AuthError::Configuration(
                "signing secret must not be empty".to_string(),
            ));
        }
        if ttl <= Duration::zero() {
            return Err(AuthError::Configuration(
                "token lifetime must be positive".to_string(),
            ));
        }
        if Utc::now().checked_add_signed(ttl).is_none() {
            return Err(AuthError::Configuration(
                "token lifetime is out of range".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        })
    }

    /// Returns the lifetime of issued tokens
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Creates a signed token for a username
    ///
    /// # Token Properties
    /// - Expires after the configured lifetime
    /// - Signed with HS256
    /// - Contains the username in the 'sub' claim
    pub fn issue(&self, username: &str) -> AuthResult<String> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::TokenCreation("token expiry out of range".to_string()))?;
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Verifies and decodes a token
    ///
    /// The header's algorithm is compared against [`ALGORITHM`] before any
    /// signature work, so a token cannot choose how it gets verified.
    ///
    /// # Returns
    /// * `Ok(Claims)` - The decoded claims if the token is valid
    /// * `Err(AuthError::UnexpectedAlgorithm)` - Header names another algorithm
    /// * `Err(AuthError::TokenExpired)` - Signature is fine but `exp` has passed
    /// * `Err(AuthError::InvalidToken)` - Malformed or tampered token
    pub fn validate(&self, token: &str) -> AuthResult<Claims> {
        let header = decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        if header.alg != ALGORITHM {
            return Err(AuthError::UnexpectedAlgorithm(format!("{:?}", header.alg)));
        }

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }

    /// Validates a token and returns the username it was issued for
    pub fn username(&self, token: &str) -> AuthResult<String> {
        self.validate(token).map(|claims| claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    fn service() -> TokenService {
        TokenService::new(TEST_SECRET, Duration::hours(8)).expect("valid service")
    }

    /// Replaces one character in the middle of the given token segment
    fn tamper(token: &str, segment: usize) -> String {
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let target = &parts[segment];
        let mid = target.len() / 2;
        let original = target.as_bytes()[mid] as char;
        let replacement = if original == 'A' { 'B' } else { 'A' };

        let mut altered = target.clone();
        altered.replace_range(mid..mid + 1, &replacement.to_string());
        parts[segment] = altered;
        parts.join(".")
    }

    fn sign(claims: &Claims, algorithm: Algorithm, secret: &str) -> String {
        encode(
            &Header::new(algorithm),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("valid token")
    }

    #[test]
    fn create_and_verify_token() {
        let tokens = service();
        let token = tokens.issue("ada").expect("valid token");

        let claims = tokens.validate(&token).expect("valid verification");
        assert_eq!(claims.sub, "ada");
    }

    #[test]
    fn username_matches_issuer() {
        let tokens = service();
        let token = tokens.issue("grace_hopper").expect("valid token");

        assert_eq!(tokens.username(&token).unwrap(), "grace_hopper");
    }

    #[test]
    fn wrong_secret_fails() {
        let token = service().issue("ada").expect("valid token");
        let other = TokenService::new("wrong-secret", Duration::hours(8)).unwrap();

        assert!(matches!(
            other.validate(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn invalid_token_fails() {
        let result = service().validate("invalid.token.string");
        assert!(result.is_err());
    }

    #[test]
    fn altered_payload_fails() {
        let tokens = service();
        let token = tokens.issue("ada").expect("valid token");

        assert!(tokens.validate(&tamper(&token, 1)).is_err());
    }

    #[test]
    fn altered_signature_fails() {
        let tokens = service();
        let token = tokens.issue("ada").expect("valid token");

        assert!(matches!(
            tokens.validate(&tamper(&token, 2)),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn expired_token_fails_even_with_valid_signature() {
        let now = Utc::now();
        let claims = Claims {
            sub: "ada".to_string(),
            iat: (now - Duration::hours(2)).timestamp() as usize,
            exp: (now - Duration::seconds(30)).timestamp() as usize,
        };
        let token = sign(&claims, ALGORITHM, TEST_SECRET);

        assert!(matches!(
            service().validate(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn other_hmac_algorithm_rejected() {
        let now = Utc::now();
        let claims = Claims {
            sub: "ada".to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(1)).timestamp() as usize,
        };
        let token = sign(&claims, Algorithm::HS384, TEST_SECRET);

        assert!(matches!(
            service().validate(&token),
            Err(AuthError::UnexpectedAlgorithm(_))
        ));
    }

    #[test]
    fn token_expiry_set() {
        let tokens = service();
        let token = tokens.issue("ada").expect("valid token");

        let claims = tokens.validate(&token).expect("valid verification");
        let expiry_time = claims.exp as i64;
        let now = Utc::now().timestamp();
        let in_8_hours = (Utc::now() + Duration::hours(8)).timestamp();

        // Token should expire within 8 hours (with some buffer for test execution time)
        assert!(expiry_time > now);
        assert!(expiry_time <= in_8_hours + 10);
        assert!(claims.iat as i64 <= now);
    }

    #[test]
    fn empty_secret_rejected() {
        assert!(matches!(
            TokenService::new("", Duration::hours(1)),
            Err(AuthError::Configuration(_))
        ));
    }

    #[test]
    fn ttl_past_calendar_range_rejected() {
        let ttl = Duration::try_hours(3_000_000_000).expect("representable duration");

        assert!(matches!(
            TokenService::new(TEST_SECRET, ttl),
            Err(AuthError::Configuration(_))
        ));
    }

    #[test]
    fn non_positive_ttl_rejected() {
        assert!(TokenService::new(TEST_SECRET, Duration::zero()).is_err());
        assert!(TokenService::new(TEST_SECRET, Duration::seconds(-5)).is_err());
    }
}
