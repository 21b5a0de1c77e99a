//! Event publication
//!
//! Delivers the events an aggregate recorded once it has been saved.
//! Ordering and durability belong to the publisher implementation; delivery
//! is at-least-once, so consumers must be idempotent.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::TrainerAccountRequestEvent;

/// Errors that can occur while publishing events
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Event transport unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish events in the order they were recorded
    async fn publish(&self, events: &[TrainerAccountRequestEvent]) -> Result<(), PublishError>;
}

/// Writes every event to the log as structured JSON
#[derive(Debug, Default, Clone)]
pub struct LoggingEventPublisher;

impl LoggingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, events: &[TrainerAccountRequestEvent]) -> Result<(), PublishError> {
        for event in events {
            let payload = serde_json::to_string(event)?;
            tracing::info!(
                event_type = event.event_type(),
                request_id = %event.request_id(),
                payload = %payload,
                "Domain event published"
            );
        }
        Ok(())
    }
}

/// Keeps published events in memory so callers can inspect them
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    published: Mutex<Vec<TrainerAccountRequestEvent>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything published so far
    pub async fn published(&self) -> Vec<TrainerAccountRequestEvent> {
        self.published.lock().await.clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, events: &[TrainerAccountRequestEvent]) -> Result<(), PublishError> {
        self.published.lock().await.extend_from_slice(events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Email, RequestId};
    use chrono::Utc;

    fn submitted() -> TrainerAccountRequestEvent {
        TrainerAccountRequestEvent::TrainerAccountRequestSubmitted {
            request_id: RequestId::generate(),
            candidate_email: Email::new("a@x.com").unwrap(),
            occurred_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_recording_publisher_keeps_order() {
        let publisher = RecordingEventPublisher::new();
        let first = submitted();
        let second = submitted();

        publisher.publish(&[first.clone()]).await.unwrap();
        publisher.publish(&[second.clone()]).await.unwrap();

        assert_eq!(publisher.published().await, vec![first, second]);
    }

    #[tokio::test]
    async fn test_logging_publisher_accepts_events() {
        let publisher = LoggingEventPublisher::new();
        assert!(publisher.publish(&[submitted()]).await.is_ok());
        assert!(publisher.publish(&[]).await.is_ok());
    }
}
