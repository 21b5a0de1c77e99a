//! Skill Handlers
//!
//! Changes to the skills of a request still under review. Neither change
//! records an event.

use std::sync::Arc;

use crate::aggregate::Aggregate;
use crate::domain::SkillLevel;
use crate::error::AppResult;
use crate::publisher::EventPublisher;
use crate::repository::TrainerAccountRequestRepository;

use super::submit_handler::build_skill;
use super::{commit, load_request, AddSkillCommand, SkillResult, UpgradeSkillCommand};

/// Handler for adding a skill
pub struct AddSkillHandler {
    repository: Arc<dyn TrainerAccountRequestRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl AddSkillHandler {
    pub fn new(
        repository: Arc<dyn TrainerAccountRequestRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    pub async fn execute(&self, command: AddSkillCommand) -> AppResult<SkillResult> {
        let skill = build_skill(&command.skill)?;
        let skill_id = skill.id().clone();
        let level = skill.level();

        let mut request = load_request(&*self.repository, &command.request_id).await?;
        request.add_skill(skill)?;
        commit(&*self.repository, &*self.publisher, &mut request).await?;

        tracing::info!(request_id = %request.id(), skill_id = %skill_id, "Skill added");

        Ok(SkillResult {
            request_id: request.id().clone(),
            skill_id,
            level,
            skill_count: request.skill_count(),
        })
    }
}

/// Handler for raising a skill level
pub struct UpgradeSkillHandler {
    repository: Arc<dyn TrainerAccountRequestRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl UpgradeSkillHandler {
    pub fn new(
        repository: Arc<dyn TrainerAccountRequestRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    pub async fn execute(&self, command: UpgradeSkillCommand) -> AppResult<SkillResult> {
        let level: SkillLevel = command.level.parse()?;

        let mut request = load_request(&*self.repository, &command.request_id).await?;
        request.upgrade_skill(&command.skill_id, level)?;
        commit(&*self.repository, &*self.publisher, &mut request).await?;

        tracing::info!(
            request_id = %request.id(),
            skill_id = %command.skill_id,
            level = %level,
            "Skill level upgraded"
        );

        Ok(SkillResult {
            request_id: request.id().clone(),
            skill_id: command.skill_id,
            level,
            skill_count: request.skill_count(),
        })
    }
}
