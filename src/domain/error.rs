//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

use super::{RequestId, RequestStatus, SkillId, SkillLevel};

/// Domain-specific errors
///
/// Three families live here: validation errors raised while building value
/// objects, invariant violations raised by the aggregate and its entities,
/// and policy violations raised by domain services.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // Validation errors
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("{field} '{value}' is invalid: {reason}")]
    InvalidName {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Skill name '{0}' must be between {min} and {max} characters", min = crate::domain::skill_name::MIN_LENGTH, max = crate::domain::skill_name::MAX_LENGTH)]
    InvalidSkillName(String),

    #[error("Rejection reason must be between {min} and {max} characters (got {0})", min = crate::domain::rejection_reason::MIN_LENGTH, max = crate::domain::rejection_reason::MAX_LENGTH)]
    InvalidRejectionReason(usize),

    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("'{0}' is not a valid skill level (expected BEGINNER, INTERMEDIATE or EXPERT)")]
    InvalidSkillLevel(String),

    #[error("'{0}' is not a valid request status (expected PENDING_VALIDATION, APPROVED or REJECTED)")]
    InvalidStatus(String),

    // Invariant violations
    #[error("At least one skill is required to submit a trainer account request")]
    RequiredSkills,

    #[error("Cannot downgrade skill '{skill}' from {from} to {to}")]
    SkillCannotDowngrade {
        skill: String,
        from: SkillLevel,
        to: SkillLevel,
    },

    #[error("Request {request_id} cannot be approved: current status is {status}, only PENDING_VALIDATION requests can be approved")]
    NotApprovable {
        request_id: RequestId,
        status: RequestStatus,
    },

    #[error("Request {request_id} cannot be rejected: current status is {status}, only PENDING_VALIDATION requests can be rejected")]
    NotRejectable {
        request_id: RequestId,
        status: RequestStatus,
    },

    #[error("Request {request_id} is finalized ({status}) and cannot be modified")]
    RequestFinalized {
        request_id: RequestId,
        status: RequestStatus,
    },

    #[error("Skill {skill_id} does not belong to request {request_id}")]
    SkillNotFound {
        request_id: RequestId,
        skill_id: SkillId,
    },

    #[error("A rejection reason must be present if and only if the request is REJECTED (status {0})")]
    RejectionReasonMismatch(RequestStatus),

    // Policy violations
    #[error("Email {0} is already used by an existing request")]
    EmailAlreadyUsed(String),
}

impl DomainError {
    /// Create a downgrade error
    pub fn skill_cannot_downgrade(skill: impl Into<String>, from: SkillLevel, to: SkillLevel) -> Self {
        Self::SkillCannotDowngrade {
            skill: skill.into(),
            from,
            to,
        }
    }

    /// Check if this error was raised while building a value object
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidEmail(_)
                | Self::InvalidName { .. }
                | Self::InvalidSkillName(_)
                | Self::InvalidRejectionReason(_)
                | Self::InvalidIdentifier(_)
                | Self::InvalidSkillLevel(_)
                | Self::InvalidStatus(_)
        )
    }

    /// Check if this error is an aggregate or entity invariant violation
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::RequiredSkills
                | Self::SkillCannotDowngrade { .. }
                | Self::NotApprovable { .. }
                | Self::NotRejectable { .. }
                | Self::RequestFinalized { .. }
                | Self::SkillNotFound { .. }
                | Self::RejectionReasonMismatch(_)
        )
    }

    /// Check if this error is a domain policy violation (caller may pick another input)
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, Self::EmailAlreadyUsed(_))
    }
}
