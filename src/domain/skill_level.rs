//! SkillLevel
//!
//! Ordered proficiency scale: Beginner < Intermediate < Expert.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl SkillLevel {
    /// True when `self` is the same level as `other` or above it.
    pub fn is_at_least(&self, other: SkillLevel) -> bool {
        *self >= other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "BEGINNER",
            SkillLevel::Intermediate => "INTERMEDIATE",
            SkillLevel::Expert => "EXPERT",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BEGINNER" => Ok(SkillLevel::Beginner),
            "INTERMEDIATE" => Ok(SkillLevel::Intermediate),
            "EXPERT" => Ok(SkillLevel::Expert),
            _ => Err(DomainError::InvalidSkillLevel(s.to_string())),
        }
    }
}
