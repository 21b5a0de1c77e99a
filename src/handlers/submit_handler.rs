//! Submit Request Handler
//!
//! Turns a candidate's raw submission into a new aggregate, checks email
//! uniqueness, then persists and publishes.

use std::sync::Arc;

use crate::aggregate::{Aggregate, Skill, TrainerAccountRequest};
use crate::domain::{CandidateInfo, DomainError, SkillLevel, SkillName};
use crate::error::AppResult;
use crate::publisher::EventPublisher;
use crate::repository::TrainerAccountRequestRepository;
use crate::services::EmailUniquenessService;

use super::{commit, SkillInput, SubmitRequestCommand, SubmitRequestResult};

pub(crate) fn build_skill(input: &SkillInput) -> Result<Skill, DomainError> {
    let name = SkillName::new(&input.name)?;
    let level: SkillLevel = input.level.parse()?;
    Ok(Skill::create(name, level))
}

/// Handler for new submissions
pub struct SubmitRequestHandler {
    repository: Arc<dyn TrainerAccountRequestRepository>,
    publisher: Arc<dyn EventPublisher>,
    uniqueness: EmailUniquenessService<dyn TrainerAccountRequestRepository>,
}

impl SubmitRequestHandler {
    pub fn new(
        repository: Arc<dyn TrainerAccountRequestRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            uniqueness: EmailUniquenessService::new(Arc::clone(&repository)),
            repository,
            publisher,
        }
    }

    /// Execute the submit command
    pub async fn execute(&self, command: SubmitRequestCommand) -> AppResult<SubmitRequestResult> {
        let candidate_info =
            CandidateInfo::create(&command.first_name, &command.last_name, &command.email)?;

        let skills = command
            .skills
            .iter()
            .map(build_skill)
            .collect::<Result<Vec<_>, _>>()?;

        let mut request = TrainerAccountRequest::submit(candidate_info, skills)?;

        // Point-in-time check; a concurrent submission for the same email can
        // still slip through without a storage-level constraint.
        self.uniqueness.verify(request.candidate_info().email()).await?;

        commit(&*self.repository, &*self.publisher, &mut request).await?;

        tracing::info!(
            request_id = %request.id(),
            email = %request.candidate_info().email(),
            skills = request.skill_count(),
            "Trainer account request submitted"
        );

        Ok(SubmitRequestResult {
            request_id: request.id().clone(),
            status: request.status(),
            skill_ids: request.skills().iter().map(|skill| skill.id().clone()).collect(),
            submitted_at: request.submitted_at(),
        })
    }
}
