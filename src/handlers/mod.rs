//! Command Handlers module
//!
//! Application layer around the aggregate. Every handler follows the same
//! unit of work: load the aggregate, run one aggregate operation, save it,
//! publish the recorded events, then clear them.
//!
//! Handlers assume at most one writer per aggregate at a time.

mod approve_handler;
mod commands;
mod dispatcher;
mod reject_handler;
mod skill_handler;
mod submit_handler;

pub use approve_handler::ApproveRequestHandler;
pub use commands::*;
pub use dispatcher::{Command, CommandDispatcher, CommandOutcome};
pub use reject_handler::RejectRequestHandler;
pub use skill_handler::{AddSkillHandler, UpgradeSkillHandler};
pub use submit_handler::SubmitRequestHandler;

use crate::aggregate::{Aggregate, TrainerAccountRequest};
use crate::domain::RequestId;
use crate::error::{AppError, AppResult};
use crate::publisher::EventPublisher;
use crate::repository::TrainerAccountRequestRepository;

/// Load a request or fail with `NotFound`
pub(crate) async fn load_request(
    repository: &dyn TrainerAccountRequestRepository,
    request_id: &RequestId,
) -> AppResult<TrainerAccountRequest> {
    repository
        .find(request_id)
        .await?
        .ok_or_else(|| AppError::NotFound(request_id.to_string()))
}

/// Save the aggregate, publish what it recorded, then clear its events.
///
/// A failed publication leaves the state saved and hands the recorded events
/// back in `AppError::EventsUndelivered`.
pub(crate) async fn commit(
    repository: &dyn TrainerAccountRequestRepository,
    publisher: &dyn EventPublisher,
    request: &mut TrainerAccountRequest,
) -> AppResult<()> {
    repository.save(request).await?;

    let events = request.events();
    if let Err(e) = publisher.publish(&events).await {
        tracing::warn!(
            aggregate = TrainerAccountRequest::aggregate_type(),
            request_id = %request.id(),
            pending = events.len(),
            "Request saved but events could not be published: {}",
            e
        );
        for event in &events {
            tracing::warn!(
                request_id = %event.request_id(),
                event_type = event.event_type(),
                occurred_at = %event.occurred_at(),
                "Undelivered event"
            );
        }
        request.clear_events();
        return Err(AppError::EventsUndelivered {
            request_id: request.id().clone(),
            pending: events,
            source: e,
        });
    }

    tracing::debug!(
        aggregate = TrainerAccountRequest::aggregate_type(),
        request_id = %request.id(),
        published = events.len(),
        "Aggregate committed"
    );
    request.clear_events();
    Ok(())
}
