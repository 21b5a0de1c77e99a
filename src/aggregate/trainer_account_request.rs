//! TrainerAccountRequest Aggregate
//!
//! Consistency boundary around a candidate's request to become a trainer.
//! It owns the candidate information and the skills, drives the review
//! state machine and records a domain event for every transition.
//!
//! Invariants:
//! - at least one skill at all times
//! - status only moves along the `RequestStatus` transition table
//! - a rejection reason is present if and only if the status is REJECTED
//! - skill membership and levels change only while PENDING_VALIDATION

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::domain::{
    AdminId, CandidateInfo, DomainError, RejectionReason, RequestId, RequestStatus, SkillId,
    SkillLevel, TrainerAccountRequestEvent,
};

use super::{Aggregate, Skill};

/// TrainerAccountRequest Aggregate Root
///
/// Obtain a new instance through [`TrainerAccountRequest::submit`]; repositories
/// rebuild stored ones through [`TrainerAccountRequest::restore`]. Both paths
/// check the invariants, so no code path yields an aggregate without skills.
#[derive(Debug, Clone, Serialize)]
pub struct TrainerAccountRequest {
    /// Unique request ID
    id: RequestId,

    /// Who is applying (immutable after creation)
    candidate_info: CandidateInfo,

    /// Declared skills, in submission order
    skills: Vec<Skill>,

    /// Review status
    status: RequestStatus,

    /// When the candidate submitted
    submitted_at: DateTime<Utc>,

    /// Present iff status is REJECTED
    rejection_reason: Option<RejectionReason>,

    /// Recorded but not yet published events
    #[serde(skip)]
    events: Vec<TrainerAccountRequestEvent>,
}

impl TrainerAccountRequest {
    fn new(
        id: RequestId,
        candidate_info: CandidateInfo,
        skills: Vec<Skill>,
        status: RequestStatus,
        submitted_at: DateTime<Utc>,
        rejection_reason: Option<RejectionReason>,
    ) -> Result<Self, DomainError> {
        if skills.is_empty() {
            return Err(DomainError::RequiredSkills);
        }

        if rejection_reason.is_some() != (status == RequestStatus::Rejected) {
            return Err(DomainError::RejectionReasonMismatch(status));
        }

        Ok(Self {
            id,
            candidate_info,
            skills,
            status,
            submitted_at,
            rejection_reason,
            events: Vec::new(),
        })
    }

    // =========================================================================
    // Factories
    // =========================================================================

    /// Submit a new trainer account request.
    ///
    /// Generates the ID, forces PENDING_VALIDATION, stamps the submission
    /// time and records `TrainerAccountRequestSubmitted`.
    ///
    /// # Errors
    /// - `DomainError::RequiredSkills` if `skills` is empty
    pub fn submit(candidate_info: CandidateInfo, skills: Vec<Skill>) -> Result<Self, DomainError> {
        let now = Utc::now();
        let mut request = Self::new(
            RequestId::generate(),
            candidate_info,
            skills,
            RequestStatus::PendingValidation,
            now,
            None,
        )?;

        let event = TrainerAccountRequestEvent::TrainerAccountRequestSubmitted {
            request_id: request.id.clone(),
            candidate_email: request.candidate_info.email().clone(),
            occurred_at: now,
        };
        request.record_event(event);

        tracing::debug!(
            request_id = %request.id,
            skills = request.skills.len(),
            "Trainer account request submitted"
        );

        Ok(request)
    }

    /// Rebuild a stored request. Records no events.
    ///
    /// # Errors
    /// - `DomainError::RequiredSkills` if `skills` is empty
    /// - `DomainError::RejectionReasonMismatch` if the reason does not match the status
    pub fn restore(
        id: RequestId,
        candidate_info: CandidateInfo,
        skills: Vec<Skill>,
        status: RequestStatus,
        submitted_at: DateTime<Utc>,
        rejection_reason: Option<RejectionReason>,
    ) -> Result<Self, DomainError> {
        Self::new(id, candidate_info, skills, status, submitted_at, rejection_reason)
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Approve the request (administrator action)
    ///
    /// # Errors
    /// - `DomainError::NotApprovable` unless PENDING_VALIDATION
    pub fn approve(&mut self, admin_id: AdminId) -> Result<(), DomainError> {
        if !self.status.can_be_approved() {
            return Err(DomainError::NotApprovable {
                request_id: self.id.clone(),
                status: self.status,
            });
        }

        self.status = RequestStatus::Approved;
        self.record_event(TrainerAccountRequestEvent::TrainerAccountRequestApproved {
            request_id: self.id.clone(),
            approved_by: admin_id,
            occurred_at: Utc::now(),
        });

        tracing::debug!(request_id = %self.id, "Trainer account request approved");
        Ok(())
    }

    /// Reject the request with a mandatory reason (administrator action)
    ///
    /// # Errors
    /// - `DomainError::NotRejectable` unless PENDING_VALIDATION
    pub fn reject(&mut self, admin_id: AdminId, reason: RejectionReason) -> Result<(), DomainError> {
        if !self.status.can_be_rejected() {
            return Err(DomainError::NotRejectable {
                request_id: self.id.clone(),
                status: self.status,
            });
        }

        self.status = RequestStatus::Rejected;
        self.rejection_reason = Some(reason.clone());
        self.record_event(TrainerAccountRequestEvent::TrainerAccountRequestRejected {
            request_id: self.id.clone(),
            rejected_by: admin_id,
            reason,
            occurred_at: Utc::now(),
        });

        tracing::debug!(request_id = %self.id, "Trainer account request rejected");
        Ok(())
    }

    /// Append a skill while the request is still under review
    ///
    /// # Errors
    /// - `DomainError::RequestFinalized` once APPROVED or REJECTED
    pub fn add_skill(&mut self, skill: Skill) -> Result<(), DomainError> {
        self.ensure_not_finalized()?;
        self.skills.push(skill);
        Ok(())
    }

    /// Raise the level of an owned skill while the request is under review
    ///
    /// # Errors
    /// - `DomainError::RequestFinalized` once APPROVED or REJECTED
    /// - `DomainError::SkillNotFound` if no owned skill has `skill_id`
    /// - `DomainError::SkillCannotDowngrade` if `level` is below the current one
    pub fn upgrade_skill(&mut self, skill_id: &SkillId, level: SkillLevel) -> Result<(), DomainError> {
        self.ensure_not_finalized()?;

        let request_id = &self.id;
        let skill = self
            .skills
            .iter_mut()
            .find(|skill| skill.id() == skill_id)
            .ok_or_else(|| DomainError::SkillNotFound {
                request_id: request_id.clone(),
                skill_id: skill_id.clone(),
            })?;

        skill.upgrade_level(level)
    }

    fn ensure_not_finalized(&self) -> Result<(), DomainError> {
        if self.status.is_final() {
            return Err(DomainError::RequestFinalized {
                request_id: self.id.clone(),
                status: self.status,
            });
        }
        Ok(())
    }

    fn record_event(&mut self, event: TrainerAccountRequestEvent) {
        self.events.push(event);
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn candidate_info(&self) -> &CandidateInfo {
        &self.candidate_info
    }

    /// Independent copy of the skills; mutating it never touches the aggregate
    pub fn skills(&self) -> Vec<Skill> {
        self.skills.clone()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    /// Copy of an owned skill
    pub fn find_skill(&self, skill_id: &SkillId) -> Option<Skill> {
        self.skills.iter().find(|skill| skill.id() == skill_id).cloned()
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::PendingValidation
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn rejection_reason(&self) -> Option<&RejectionReason> {
        self.rejection_reason.as_ref()
    }
}

impl Aggregate for TrainerAccountRequest {
    type Id = RequestId;
    type Event = TrainerAccountRequestEvent;

    fn aggregate_type() -> &'static str {
        "TrainerAccountRequest"
    }

    fn id(&self) -> &RequestId {
        &self.id
    }

    fn events(&self) -> Vec<TrainerAccountRequestEvent> {
        self.events.clone()
    }

    fn clear_events(&mut self) {
        self.events.clear();
    }

    fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}

impl fmt::Display for TrainerAccountRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TrainerAccountRequest(id={}, email={}, status={}, skills={})",
            self.id,
            self.candidate_info.email(),
            self.status,
            self.skills.len()
        )
    }
}
