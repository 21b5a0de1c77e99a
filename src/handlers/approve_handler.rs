//! Approve Request Handler

use std::sync::Arc;

use crate::aggregate::Aggregate;
use crate::error::AppResult;
use crate::publisher::EventPublisher;
use crate::repository::TrainerAccountRequestRepository;

use super::{commit, load_request, ApproveRequestCommand, ReviewResult};

/// Handler for administrator approvals
pub struct ApproveRequestHandler {
    repository: Arc<dyn TrainerAccountRequestRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl ApproveRequestHandler {
    pub fn new(
        repository: Arc<dyn TrainerAccountRequestRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    /// Execute the approve command
    pub async fn execute(&self, command: ApproveRequestCommand) -> AppResult<ReviewResult> {
        let mut request = load_request(&*self.repository, &command.request_id).await?;

        if let Err(e) = request.approve(command.admin_id.clone()) {
            tracing::warn!(request_id = %command.request_id, "Approval refused: {}", e);
            return Err(e.into());
        }

        commit(&*self.repository, &*self.publisher, &mut request).await?;

        tracing::info!(
            request_id = %request.id(),
            admin_id = %command.admin_id,
            "Trainer account request approved"
        );

        Ok(ReviewResult {
            request_id: request.id().clone(),
            status: request.status(),
            reviewed_by: command.admin_id,
        })
    }
}
