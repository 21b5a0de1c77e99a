//! Repository module
//!
//! Persistence contract for the trainer account request aggregate.
//! One repository per aggregate root; it always loads and saves the whole
//! aggregate, skills included.

mod error;
mod in_memory;

pub use error::RepositoryError;
pub use in_memory::InMemoryTrainerAccountRequestRepository;

use async_trait::async_trait;

use crate::aggregate::TrainerAccountRequest;
use crate::domain::{Email, RequestId, RequestStatus};

/// Repository for the TrainerAccountRequest aggregate root.
///
/// `find*` return either the complete aggregate or `None`, never a partial one.
/// Stored aggregates carry no pending events.
#[async_trait]
pub trait TrainerAccountRequestRepository: Send + Sync {
    /// Insert or update the whole aggregate, skills included (cascade).
    /// Callers publish and then clear the aggregate's events afterwards.
    async fn save(&self, request: &TrainerAccountRequest) -> Result<(), RepositoryError>;

    /// Find a request by its ID
    async fn find(&self, request_id: &RequestId) -> Result<Option<TrainerAccountRequest>, RepositoryError>;

    /// Find a request by candidate email
    async fn find_by_email(&self, email: &Email) -> Result<Option<TrainerAccountRequest>, RepositoryError>;

    /// All requests awaiting an administrator decision
    async fn find_pending_validation(&self) -> Result<Vec<TrainerAccountRequest>, RepositoryError> {
        self.find_by_status(RequestStatus::PendingValidation).await
    }

    /// All requests with the given status
    async fn find_by_status(&self, status: RequestStatus) -> Result<Vec<TrainerAccountRequest>, RepositoryError>;

    /// Whether any request uses this email
    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError>;

    /// Delete the aggregate and its skills (cascade)
    async fn delete(&self, request: &TrainerAccountRequest) -> Result<(), RepositoryError>;

    /// Number of requests with the given status
    async fn count_by_status(&self, status: RequestStatus) -> Result<usize, RepositoryError>;
}
