//! RejectionReason

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DomainError;

pub const MIN_LENGTH: usize = 10;
pub const MAX_LENGTH: usize = 500;

/// Why an administrator rejected a request. Trimmed, 10 to 500 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RejectionReason(String);

impl RejectionReason {
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let normalized = value.trim();
        let length = normalized.chars().count();

        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(DomainError::InvalidRejectionReason(length));
        }

        Ok(Self(normalized.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RejectionReason {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RejectionReason::new(&value)
    }
}

impl From<RejectionReason> for String {
    fn from(reason: RejectionReason) -> Self {
        reason.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_trimmed() {
        let reason = RejectionReason::new("   insufficient experience   ").unwrap();
        assert_eq!(reason.as_str(), "insufficient experience");
    }

    #[test]
    fn test_reason_too_short_after_trim() {
        let result = RejectionReason::new("   too short  ");
        assert!(matches!(result, Err(DomainError::InvalidRejectionReason(9))));
    }

    #[test]
    fn test_reason_bounds() {
        assert!(RejectionReason::new(&"r".repeat(10)).is_ok());
        assert!(RejectionReason::new(&"r".repeat(500)).is_ok());
        assert!(RejectionReason::new(&"r".repeat(501)).is_err());
    }
}
