//! FullName
//!
//! Candidate first and last name, each trimmed and capitalized.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::DomainError;

/// Minimum length of each name part
pub const MIN_LENGTH: usize = 2;

/// Maximum length of each name part
pub const MAX_LENGTH: usize = 100;

/// Upper-case the first character and lower-case the rest.
pub(crate) fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn validate_part(field: &'static str, raw: &str) -> Result<String, DomainError> {
    let normalized = capitalize(raw.trim());
    let length = normalized.chars().count();

    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(DomainError::InvalidName {
            field,
            value: raw.to_string(),
            reason: format!("must be between {} and {} characters", MIN_LENGTH, MAX_LENGTH),
        });
    }

    if !normalized
        .chars()
        .all(|c| c.is_alphabetic() || matches!(c, '-' | '\'' | ' '))
    {
        return Err(DomainError::InvalidName {
            field,
            value: raw.to_string(),
            reason: "only letters, hyphens, apostrophes and spaces are allowed".to_string(),
        });
    }

    Ok(normalized)
}

/// FullName of a candidate.
///
/// # Invariants
/// - Both parts trimmed and capitalized
/// - Each part length within [2, 100]
/// - Letters, `-`, `'` and spaces only
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFullName")]
pub struct FullName {
    first_name: String,
    last_name: String,
}

#[derive(Deserialize)]
struct RawFullName {
    first_name: String,
    last_name: String,
}

impl FullName {
    /// Create a new FullName.
    ///
    /// # Errors
    /// - `DomainError::InvalidName` naming the offending part
    pub fn new(first_name: &str, last_name: &str) -> Result<Self, DomainError> {
        let first_name = validate_part("First name", first_name)?;
        let last_name = validate_part("Last name", last_name)?;

        Ok(Self {
            first_name,
            last_name,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

impl TryFrom<RawFullName> for FullName {
    type Error = DomainError;

    fn try_from(raw: RawFullName) -> Result<Self, Self::Error> {
        FullName::new(&raw.first_name, &raw.last_name)
    }
}
