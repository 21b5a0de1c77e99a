//! SkillName

use serde::{Deserialize, Serialize};
use std::fmt;

use super::full_name::capitalize;
use super::DomainError;

pub const MIN_LENGTH: usize = 2;
pub const MAX_LENGTH: usize = 100;

/// Trimmed, capitalized skill name of 2 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SkillName(String);

impl SkillName {
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let normalized = capitalize(value.trim());
        let length = normalized.chars().count();

        if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            return Err(DomainError::InvalidSkillName(value.to_string()));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SkillName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SkillName::new(&value)
    }
}

impl From<SkillName> for String {
    fn from(name: SkillName) -> Self {
        name.0
    }
}
