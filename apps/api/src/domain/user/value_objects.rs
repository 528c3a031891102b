use serde::{Deserialize, Serialize};
use std::fmt;

/// Email value object representing a valid email address
///
/// # Invariants
/// - Must contain '@' character
/// - Must be at least 3 characters long
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Example
    /// ```
    /// use orkidslearning_api::domain::user::value_objects::Email;
    ///
    /// let email = Email::new("test@example.com").expect("valid email");
    /// assert_eq!(email.as_str(), "test@example.com");
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, String> {
        let email = email.into().trim().to_string();
        if Self::is_valid(&email) {
            Ok(Email(email))
        } else {
            Err(format!("Invalid email: {}", email))
        }
    }

    fn is_valid(email: &str) -> bool {
        email.contains('@') && email.len() >= 3
    }

    /// Returns the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Username value object
///
/// # Invariants
/// - 3 to 32 characters long
/// - Only ASCII letters, digits, '_', '-' and '.'
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 32;

    /// Creates a new Username value object
    ///
    /// # Example
    /// ```
    /// use orkidslearning_api::domain::user::value_objects::Username;
    ///
    /// let username = Username::new("ada_l").expect("valid username");
    /// assert_eq!(username.as_str(), "ada_l");
    /// ```
    pub fn new(username: impl Into<String>) -> Result<Self, String> {
        let username = username.into().trim().to_string();
        let len = username.chars().count();
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(format!(
                "Username must be between {} and {} characters",
                Self::MIN_LEN,
                Self::MAX_LEN
            ));
        }

        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(
                "Username may only contain letters, digits, '_', '-' and '.'".to_string(),
            );
        }

        Ok(Username(username))
    }

    /// Returns the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email() {
        assert!(Email::new("test@example.com").is_ok());
    }

    #[test]
    fn valid_email_with_subdomain() {
        assert!(Email::new("user@mail.example.com").is_ok());
    }

    #[test]
    fn valid_email_minimum_length() {
        assert!(Email::new("a@b").is_ok());
    }

    #[test]
    fn email_is_trimmed() {
        let email = Email::new("  test@example.com ").unwrap();
        assert_eq!(email.as_str(), "test@example.com");
    }

    #[test]
    fn invalid_email_no_at_symbol() {
        assert!(Email::new("invalid").is_err());
    }

    #[test]
    fn invalid_email_too_short() {
        assert!(Email::new("a@").is_err());
    }

    #[test]
    fn invalid_email_empty() {
        assert!(Email::new("").is_err());
    }

    #[test]
    fn email_display() {
        let email = Email::new("test@example.com").unwrap();
        assert_eq!(format!("{}", email), "test@example.com");
    }

    #[test]
    fn valid_username() {
        assert!(Username::new("ada").is_ok());
        assert!(Username::new("grace.hopper-1_x").is_ok());
    }

    #[test]
    fn username_too_short() {
        assert!(Username::new("ab").is_err());
    }

    #[test]
    fn username_too_long() {
        assert!(Username::new("a".repeat(33)).is_err());
        assert!(Username::new("a".repeat(32)).is_ok());
    }

    #[test]
    fn username_rejects_spaces_and_symbols() {
        assert!(Username::new("ada lovelace").is_err());
        assert!(Username::new("ada@home").is_err());
    }

    #[test]
    fn username_is_trimmed() {
        assert_eq!(Username::new(" ada ").unwrap().as_str(), "ada");
    }
}
