//! Common test utilities

#![allow(dead_code)]

use std::sync::Arc;

use trainer_onboarding::handlers::{CommandDispatcher, SubmitRequestCommand};
use trainer_onboarding::publisher::{EventPublisher, RecordingEventPublisher};
use trainer_onboarding::repository::{
    InMemoryTrainerAccountRequestRepository, TrainerAccountRequestRepository,
};

pub const REJECTION_REASON: &str = "insufficient experience in the domain";

/// Repository, publisher and dispatcher sharing the same state
pub struct TestContext {
    pub repository: Arc<InMemoryTrainerAccountRequestRepository>,
    pub publisher: Arc<RecordingEventPublisher>,
    pub dispatcher: CommandDispatcher,
}

impl TestContext {
    pub fn repository_handle(&self) -> Arc<dyn TrainerAccountRequestRepository> {
        self.repository.clone()
    }

    pub fn publisher_handle(&self) -> Arc<dyn EventPublisher> {
        self.publisher.clone()
    }
}

pub fn setup() -> TestContext {
    let repository = Arc::new(InMemoryTrainerAccountRequestRepository::new());
    let publisher = Arc::new(RecordingEventPublisher::new());
    let dispatcher = CommandDispatcher::new(repository.clone(), publisher.clone());

    TestContext {
        repository,
        publisher,
        dispatcher,
    }
}

pub fn submission(email: &str) -> SubmitRequestCommand {
    SubmitRequestCommand::new("Ada".to_string(), "Lovelace".to_string(), email.to_string())
        .with_skill("python", "expert")
}
