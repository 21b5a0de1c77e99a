//! Repository Errors

/// Errors that can occur in a trainer account request repository
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored data no longer satisfies the aggregate invariants
    #[error("Corrupted record: {0}")]
    Corrupted(#[from] crate::domain::DomainError),
}

impl RepositoryError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, RepositoryError::Storage(_))
    }
}
