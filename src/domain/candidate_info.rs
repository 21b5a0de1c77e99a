//! CandidateInfo
//!
//! Composite value object grouping the candidate's name and email.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{DomainError, Email, FullName};

/// Candidate information, validated as a whole and immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateInfo {
    full_name: FullName,
    email: Email,
}

impl CandidateInfo {
    pub fn new(full_name: FullName, email: Email) -> Self {
        Self { full_name, email }
    }

    /// Build from raw strings, validating every field.
    pub fn create(first_name: &str, last_name: &str, email: &str) -> Result<Self, DomainError> {
        Ok(Self {
            full_name: FullName::new(first_name, last_name)?,
            email: Email::new(email)?,
        })
    }

    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Both constituents are present; always true once constructed.
    pub fn is_complete(&self) -> bool {
        !self.full_name.first_name().is_empty()
            && !self.full_name.last_name().is_empty()
            && !self.email.as_str().is_empty()
    }
}

impl fmt::Display for CandidateInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name, self.email)
    }
}
