//! Email type
//!
//! Normalized (trimmed, lower-cased) candidate email address.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::DomainError;

/// Minimum length of a normalized email
pub const MIN_LENGTH: usize = 5;

/// Maximum length of a normalized email
pub const MAX_LENGTH: usize = 254;

/// Single `@`, no whitespace, dotted domain
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("Invalid EMAIL_PATTERN constant"))
}

/// Email represents a validated, normalized email address.
///
/// # Invariants
/// - Trimmed and lower-cased
/// - Length within [5, 254]
/// - Exactly one `@` followed by a dotted domain
///
/// # Example
/// ```
/// use trainer_onboarding::domain::Email;
///
/// let email = Email::new("  Alice@Example.COM ").unwrap();
/// assert_eq!(email.as_str(), "alice@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new Email with normalization and validation.
    ///
    /// # Errors
    /// - `DomainError::InvalidEmail` if the normalized value is out of range or malformed
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let normalized = value.trim().to_lowercase();
        let length = normalized.chars().count();

        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(DomainError::InvalidEmail(value.to_string()));
        }

        if !email_regex().is_match(&normalized) {
            return Err(DomainError::InvalidEmail(value.to_string()));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Domain part (after the `@`)
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, domain)| domain).unwrap_or_default()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Email::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::new(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
