//! Command dispatcher
//!
//! Routes a tagged command to its handler. Used by the command-stream binary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::aggregate::TrainerAccountRequest;
use crate::domain::RequestStatus;
use crate::error::AppResult;
use crate::publisher::EventPublisher;
use crate::repository::TrainerAccountRequestRepository;

use super::{
    AddSkillCommand, AddSkillHandler, ApproveRequestCommand, ApproveRequestHandler,
    RejectRequestCommand, RejectRequestHandler, ReviewResult, SkillResult, SubmitRequestCommand,
    SubmitRequestHandler, SubmitRequestResult, UpgradeSkillCommand, UpgradeSkillHandler,
};

/// Every command the dispatcher understands, tagged by `"command"`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Submit(SubmitRequestCommand),
    Approve(ApproveRequestCommand),
    Reject(RejectRequestCommand),
    AddSkill(AddSkillCommand),
    UpgradeSkill(UpgradeSkillCommand),
    /// Requests awaiting review, oldest first
    ListPending,
    /// Number of requests per status
    Stats,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Submit(_) => "submit",
            Command::Approve(_) => "approve",
            Command::Reject(_) => "reject",
            Command::AddSkill(_) => "add_skill",
            Command::UpgradeSkill(_) => "upgrade_skill",
            Command::ListPending => "list_pending",
            Command::Stats => "stats",
        }
    }
}

/// What a dispatched command produced
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    Submitted(SubmitRequestResult),
    Reviewed(ReviewResult),
    SkillChanged(SkillResult),
    Pending { requests: Vec<TrainerAccountRequest> },
    Stats { counts: BTreeMap<String, usize> },
}

pub struct CommandDispatcher {
    repository: Arc<dyn TrainerAccountRequestRepository>,
    submit: SubmitRequestHandler,
    approve: ApproveRequestHandler,
    reject: RejectRequestHandler,
    add_skill: AddSkillHandler,
    upgrade_skill: UpgradeSkillHandler,
}

impl CommandDispatcher {
    pub fn new(
        repository: Arc<dyn TrainerAccountRequestRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            submit: SubmitRequestHandler::new(Arc::clone(&repository), Arc::clone(&publisher)),
            approve: ApproveRequestHandler::new(Arc::clone(&repository), Arc::clone(&publisher)),
            reject: RejectRequestHandler::new(Arc::clone(&repository), Arc::clone(&publisher)),
            add_skill: AddSkillHandler::new(Arc::clone(&repository), Arc::clone(&publisher)),
            upgrade_skill: UpgradeSkillHandler::new(Arc::clone(&repository), publisher),
            repository,
        }
    }

    pub async fn dispatch(&self, command: Command) -> AppResult<CommandOutcome> {
        tracing::debug!(command = command.name(), "Dispatching command");

        match command {
            Command::Submit(cmd) => self.submit.execute(cmd).await.map(CommandOutcome::Submitted),
            Command::Approve(cmd) => self.approve.execute(cmd).await.map(CommandOutcome::Reviewed),
            Command::Reject(cmd) => self.reject.execute(cmd).await.map(CommandOutcome::Reviewed),
            Command::AddSkill(cmd) => self
                .add_skill
                .execute(cmd)
                .await
                .map(CommandOutcome::SkillChanged),
            Command::UpgradeSkill(cmd) => self
                .upgrade_skill
                .execute(cmd)
                .await
                .map(CommandOutcome::SkillChanged),
            Command::ListPending => {
                let requests = self.repository.find_pending_validation().await?;
                Ok(CommandOutcome::Pending { requests })
            }
            Command::Stats => {
                let mut counts = BTreeMap::new();
                for status in RequestStatus::ALL {
                    let count = self.repository.count_by_status(status).await?;
                    counts.insert(status.to_string(), count);
                }
                Ok(CommandOutcome::Stats { counts })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        let json = r#"{"command":"submit","first_name":"Ada","last_name":"Lovelace","email":"a@x.com","skills":[{"name":"python","level":"expert"}]}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(command.name(), "submit");

        let command: Command = serde_json::from_str(r#"{"command":"stats"}"#).unwrap();
        assert!(matches!(command, Command::Stats));
    }

    #[test]
    fn test_add_skill_command_parsing() {
        let json = r#"{"command":"add_skill","request_id":"6f9619ff-8b86-d011-b42d-00c04fc964ff","name":"Go","level":"beginner"}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        match command {
            Command::AddSkill(cmd) => assert_eq!(cmd.skill.name, "Go"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_command_rejected() {
        let result: Result<Command, _> = serde_json::from_str(r#"{"command":"delete"}"#);
        assert!(result.is_err());
    }
}
