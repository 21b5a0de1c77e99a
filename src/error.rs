//! Error handling module
//!
//! Application-level error type wrapping domain, repository, publication and
//! configuration failures.

use serde::Serialize;

use crate::domain::{DomainError, RequestId, TrainerAccountRequestEvent};
use crate::publisher::PublishError;
use crate::repository::RepositoryError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Trainer account request not found: {0}")]
    NotFound(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Infrastructure errors
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The request was saved but its events were not delivered.
    /// `pending` holds them in recorded order for redelivery.
    #[error("Request {request_id} saved but {} event(s) undelivered: {source}", .pending.len())]
    EventsUndelivered {
        request_id: RequestId,
        pending: Vec<TrainerAccountRequestEvent>,
        source: PublishError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Error body written by the command-stream binary
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
}

impl AppError {
    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::NotFound(_) => "not_found",
            AppError::Domain(domain_err) => match domain_err {
                DomainError::RequiredSkills => "required_skills",
                DomainError::SkillCannotDowngrade { .. } => "skill_cannot_downgrade",
                DomainError::NotApprovable { .. } => "not_approvable",
                DomainError::NotRejectable { .. } => "not_rejectable",
                DomainError::RequestFinalized { .. } => "request_finalized",
                DomainError::SkillNotFound { .. } => "skill_not_found",
                DomainError::RejectionReasonMismatch(_) => "rejection_reason_mismatch",
                DomainError::EmailAlreadyUsed(_) => "email_already_used",
                other if other.is_validation_error() => "validation_error",
                _ => "domain_error",
            },
            AppError::Repository(repo_err) if repo_err.is_retryable() => "repository_unavailable",
            AppError::Repository(_) => "repository_error",
            AppError::EventsUndelivered { .. } => "events_undelivered",
            AppError::Config(_) => "config_error",
        }
    }

    /// Check if this error is the caller's fault
    pub fn is_client_error(&self) -> bool {
        match self {
            AppError::InvalidRequest(_) | AppError::NotFound(_) => true,
            AppError::Domain(_) => true,
            _ => false,
        }
    }

    /// Events that were recorded and persisted but never published
    pub fn undelivered_events(&self) -> &[TrainerAccountRequestEvent] {
        match self {
            AppError::EventsUndelivered { pending, .. } => pending,
            _ => &[],
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        if !self.is_client_error() {
            tracing::error!("Internal failure: {:?}", self);
        }

        ErrorResponse {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        }
    }
}
