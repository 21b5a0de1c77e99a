//! Reject Request Handler

use std::sync::Arc;

use crate::aggregate::Aggregate;
use crate::domain::RejectionReason;
use crate::error::AppResult;
use crate::publisher::EventPublisher;
use crate::repository::TrainerAccountRequestRepository;

use super::{commit, load_request, RejectRequestCommand, ReviewResult};

/// Handler for administrator rejections
pub struct RejectRequestHandler {
    repository: Arc<dyn TrainerAccountRequestRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl RejectRequestHandler {
    pub fn new(
        repository: Arc<dyn TrainerAccountRequestRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    /// Execute the reject command
    pub async fn execute(&self, command: RejectRequestCommand) -> AppResult<ReviewResult> {
        let reason = RejectionReason::new(&command.reason)?;
        let mut request = load_request(&*self.repository, &command.request_id).await?;

        if let Err(e) = request.reject(command.admin_id.clone(), reason) {
            tracing::warn!(request_id = %command.request_id, "Rejection refused: {}", e);
            return Err(e.into());
        }

        commit(&*self.repository, &*self.publisher, &mut request).await?;

        tracing::info!(
            request_id = %request.id(),
            admin_id = %command.admin_id,
            "Trainer account request rejected"
        );

        Ok(ReviewResult {
            request_id: request.id().clone(),
            status: request.status(),
            reviewed_by: command.admin_id,
        })
    }
}
