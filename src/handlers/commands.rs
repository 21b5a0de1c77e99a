//! Command definitions
//!
//! Commands represent intentions to change a trainer account request.
//! Free-text fields stay raw here and are validated into value objects by
//! the handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AdminId, RequestId, RequestStatus, SkillId};

/// A skill as typed by the candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillInput {
    pub name: String,
    pub level: String,
}

impl SkillInput {
    pub fn new(name: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: level.into(),
        }
    }
}

// =========================================================================
// SubmitRequestCommand
// =========================================================================

/// Command to submit a new trainer account request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequestCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub skills: Vec<SkillInput>,
}

impl SubmitRequestCommand {
    pub fn new(first_name: String, last_name: String, email: String) -> Self {
        Self {
            first_name,
            last_name,
            email,
            skills: Vec::new(),
        }
    }

    pub fn with_skill(mut self, name: impl Into<String>, level: impl Into<String>) -> Self {
        self.skills.push(SkillInput::new(name, level));
        self
    }
}

/// Result of a successful submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequestResult {
    pub request_id: RequestId,
    pub status: RequestStatus,
    pub skill_ids: Vec<SkillId>,
    pub submitted_at: DateTime<Utc>,
}

// =========================================================================
// Review commands
// =========================================================================

/// Command to approve a pending request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveRequestCommand {
    pub request_id: RequestId,
    pub admin_id: AdminId,
}

impl ApproveRequestCommand {
    pub fn new(request_id: RequestId, admin_id: AdminId) -> Self {
        Self { request_id, admin_id }
    }
}

/// Command to reject a pending request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectRequestCommand {
    pub request_id: RequestId,
    pub admin_id: AdminId,
    pub reason: String,
}

impl RejectRequestCommand {
    pub fn new(request_id: RequestId, admin_id: AdminId, reason: String) -> Self {
        Self {
            request_id,
            admin_id,
            reason,
        }
    }
}

/// Result of an approval or rejection
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResult {
    pub request_id: RequestId,
    pub status: RequestStatus,
    pub reviewed_by: AdminId,
}

// =========================================================================
// Skill commands
// =========================================================================

/// Command to add a skill to a pending request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddSkillCommand {
    pub request_id: RequestId,
    #[serde(flatten)]
    pub skill: SkillInput,
}

/// Command to raise the level of a skill of a pending request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeSkillCommand {
    pub request_id: RequestId,
    pub skill_id: SkillId,
    pub level: String,
}

/// Result of a skill change
#[derive(Debug, Clone, Serialize)]
pub struct SkillResult {
    pub request_id: RequestId,
    pub skill_id: SkillId,
    pub level: crate::domain::SkillLevel,
    pub skill_count: usize,
}
