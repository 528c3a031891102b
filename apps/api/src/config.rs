//! Environment configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. Required values that are missing or unparsable are reported as a
//! [`ConfigError`]; the binary treats that as fatal.

use std::time::Duration as StdDuration;

use chrono::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_TOKEN_TTL: &str = "1h";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {0} is required but not set")]
    Missing(&'static str),

    #[error("Environment variable {name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Runtime configuration for the API server
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub port: u16,
    pub frontend_url: String,
    pub max_connections: u32,
    pub request_timeout: StdDuration,
    pub bcrypt_cost: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("port", &self.port)
            .field("frontend_url", &self.frontend_url)
            .field("max_connections", &self.max_connections)
            .field("request_timeout", &self.request_timeout)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_err() {
            tracing::debug!("No .env file found, relying on process environment");
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = get("JWT_SECRET_KEY").ok_or(ConfigError::Missing("JWT_SECRET_KEY"))?;

        let ttl_raw = get("JWT_EXPIRATION_TIME").unwrap_or_else(|| DEFAULT_TOKEN_TTL.to_string());
        let token_ttl = parse_duration(&ttl_raw).map_err(|reason| ConfigError::Invalid {
            name: "JWT_EXPIRATION_TIME",
            reason,
        })?;

        let port = parse_or("PORT", get("PORT"), DEFAULT_PORT)?;
        let max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            get("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;
        let timeout_secs: u64 = parse_or(
            "REQUEST_TIMEOUT_SECS",
            get("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }
        let bcrypt_cost = parse_or("BCRYPT_COST", get("BCRYPT_COST"), bcrypt::DEFAULT_COST)?;

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl,
            port,
            frontend_url: get("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            max_connections,
            request_timeout: StdDuration::from_secs(timeout_secs),
            bcrypt_cost,
        })
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Parses a duration such as `90s`, `15m`, `1h` or `1h30m`
///
/// Units: `h`, `m`, `s`. The total must be positive.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total = Duration::zero();
    let mut digits = String::new();
    for c in raw.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        if digits.is_empty() {
            return Err(format!("missing number before '{}' in {:?}", c, raw));
        }
        let value: i64 = digits
            .parse()
            .map_err(|_| format!("number too large in {:?}", raw))?;
        digits.clear();

        let part = match c {
            'h' => Duration::try_hours(value),
            'm' => Duration::try_minutes(value),
            's' => Duration::try_seconds(value),
            other => return Err(format!("unknown unit '{}' in {:?}", other, raw)),
        }
        .ok_or_else(|| format!("duration out of range: {:?}", raw))?;

        total = total
            .checked_add(&part)
            .ok_or_else(|| format!("duration out of range: {:?}", raw))?;
    }

    if !digits.is_empty() {
        return Err(format!("missing unit in {:?}", raw));
    }
    if total <= Duration::zero() {
        return Err(format!("duration must be positive: {:?}", raw));
    }

    Ok(total)
}
