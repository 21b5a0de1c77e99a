//! In-memory repository
//!
//! HashMap-backed implementation for tests and the command-stream binary.
//! Not durable and without a uniqueness constraint on email.
//!
//! Requests are kept as plain snapshots and rebuilt through
//! `TrainerAccountRequest::restore` on every read, so pending events never
//! survive a save and a snapshot that breaks an invariant surfaces as
//! `RepositoryError::Corrupted`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::aggregate::{Aggregate, Skill, TrainerAccountRequest};
use crate::domain::{CandidateInfo, Email, RejectionReason, RequestId, RequestStatus};

use super::{RepositoryError, TrainerAccountRequestRepository};

/// Stored row of a trainer account request
#[derive(Debug, Clone)]
struct RequestSnapshot {
    id: RequestId,
    candidate_info: CandidateInfo,
    skills: Vec<Skill>,
    status: RequestStatus,
    submitted_at: DateTime<Utc>,
    rejection_reason: Option<RejectionReason>,
}

impl RequestSnapshot {
    fn capture(request: &TrainerAccountRequest) -> Self {
        Self {
            id: request.id().clone(),
            candidate_info: request.candidate_info().clone(),
            skills: request.skills(),
            status: request.status(),
            submitted_at: request.submitted_at(),
            rejection_reason: request.rejection_reason().cloned(),
        }
    }

    fn rebuild(&self) -> Result<TrainerAccountRequest, RepositoryError> {
        TrainerAccountRequest::restore(
            self.id.clone(),
            self.candidate_info.clone(),
            self.skills.clone(),
            self.status,
            self.submitted_at,
            self.rejection_reason.clone(),
        )
        .map_err(|e| {
            tracing::error!(request_id = %self.id, "Stored request is corrupted: {}", e);
            RepositoryError::from(e)
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTrainerAccountRequestRepository {
    requests: RwLock<HashMap<RequestId, RequestSnapshot>>,
}

impl InMemoryTrainerAccountRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count_all(&self) -> usize {
        self.requests.read().await.len()
    }

    pub async fn clear(&self) {
        self.requests.write().await.clear();
    }
}

#[async_trait]
impl TrainerAccountRequestRepository for InMemoryTrainerAccountRequestRepository {
    async fn save(&self, request: &TrainerAccountRequest) -> Result<(), RepositoryError> {
        self.requests
            .write()
            .await
            .insert(request.id().clone(), RequestSnapshot::capture(request));

        tracing::debug!(request_id = %request.id(), "Saved trainer account request");
        Ok(())
    }

    async fn find(&self, request_id: &RequestId) -> Result<Option<TrainerAccountRequest>, RepositoryError> {
        self.requests
            .read()
            .await
            .get(request_id)
            .map(RequestSnapshot::rebuild)
            .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<TrainerAccountRequest>, RepositoryError> {
        self.requests
            .read()
            .await
            .values()
            .find(|snapshot| snapshot.candidate_info.email() == email)
            .map(RequestSnapshot::rebuild)
            .transpose()
    }

    async fn find_by_status(&self, status: RequestStatus) -> Result<Vec<TrainerAccountRequest>, RepositoryError> {
        let mut found = self
            .requests
            .read()
            .await
            .values()
            .filter(|snapshot| snapshot.status == status)
            .map(RequestSnapshot::rebuild)
            .collect::<Result<Vec<_>, _>>()?;
        found.sort_by_key(|request| request.submitted_at());
        Ok(found)
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        Ok(self
            .requests
            .read()
            .await
            .values()
            .any(|snapshot| snapshot.candidate_info.email() == email))
    }

    async fn delete(&self, request: &TrainerAccountRequest) -> Result<(), RepositoryError> {
        self.requests.write().await.remove(request.id());
        Ok(())
    }

    async fn count_by_status(&self, status: RequestStatus) -> Result<usize, RepositoryError> {
        Ok(self
            .requests
            .read()
            .await
            .values()
            .filter(|snapshot| snapshot.status == status)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Skill;
    use crate::domain::{AdminId, DomainError, SkillLevel, SkillName};

    fn request(email: &str) -> TrainerAccountRequest {
        TrainerAccountRequest::submit(
            CandidateInfo::create("ada", "lovelace", email).unwrap(),
            vec![Skill::create(SkillName::new("python").unwrap(), SkillLevel::Expert)],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repository = InMemoryTrainerAccountRequestRepository::new();
        let request = request("a@x.com");

        repository.save(&request).await.unwrap();

        let found = repository.find(request.id()).await.unwrap().unwrap();
        assert_eq!(found.id(), request.id());
        assert_eq!(found.skill_count(), 1);
        assert_eq!(repository.count_all().await, 1);
    }

    #[tokio::test]
    async fn test_saved_copy_has_no_pending_events() {
        let repository = InMemoryTrainerAccountRequestRepository::new();
        let request = request("a@x.com");
        assert!(request.has_pending_events());

        repository.save(&request).await.unwrap();

        let found = repository.find(request.id()).await.unwrap().unwrap();
        assert!(found.events().is_empty());
        // caller's instance untouched
        assert!(request.has_pending_events());
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repository = InMemoryTrainerAccountRequestRepository::new();
        assert!(repository.find(&RequestId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_email_and_exists() {
        let repository = InMemoryTrainerAccountRequestRepository::new();
        repository.save(&request("a@x.com")).await.unwrap();

        let email = Email::new("A@X.com").unwrap();
        assert!(repository.exists_by_email(&email).await.unwrap());
        assert!(repository.find_by_email(&email).await.unwrap().is_some());

        let other = Email::new("b@x.com").unwrap();
        assert!(!repository.exists_by_email(&other).await.unwrap());
        assert!(repository.find_by_email(&other).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_status_queries() {
        let repository = InMemoryTrainerAccountRequestRepository::new();
        let pending = request("a@x.com");
        let mut approved = request("b@x.com");
        approved.approve(AdminId::generate()).unwrap();

        repository.save(&pending).await.unwrap();
        repository.save(&approved).await.unwrap();

        let waiting = repository.find_pending_validation().await.unwrap();
        assert_eq!(waiting.len(), 1);
        assert_eq!(waiting[0].id(), pending.id());

        assert_eq!(repository.count_by_status(RequestStatus::Approved).await.unwrap(), 1);
        assert_eq!(repository.count_by_status(RequestStatus::Rejected).await.unwrap(), 0);
        assert_eq!(repository.find_by_status(RequestStatus::Approved).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let repository = InMemoryTrainerAccountRequestRepository::new();
        let mut request = request("a@x.com");
        repository.save(&request).await.unwrap();

        request.approve(AdminId::generate()).unwrap();
        repository.save(&request).await.unwrap();

        assert_eq!(repository.count_all().await, 1);
        let found = repository.find(request.id()).await.unwrap().unwrap();
        assert_eq!(found.status(), RequestStatus::Approved);
    }

    #[tokio::test]
    async fn test_rejection_reason_survives_round_trip() {
        let repository = InMemoryTrainerAccountRequestRepository::new();
        let mut request = request("a@x.com");
        let reason = RejectionReason::new("insufficient experience in the domain").unwrap();
        request.reject(AdminId::generate(), reason.clone()).unwrap();

        repository.save(&request).await.unwrap();

        let found = repository.find(request.id()).await.unwrap().unwrap();
        assert_eq!(found.status(), RequestStatus::Rejected);
        assert_eq!(found.rejection_reason(), Some(&reason));
        assert_eq!(found.skills(), request.skills());
        assert_eq!(found.submitted_at(), request.submitted_at());
    }

    #[tokio::test]
    async fn test_inconsistent_snapshot_is_corrupted() {
        let repository = InMemoryTrainerAccountRequestRepository::new();
        let request = request("a@x.com");
        let mut snapshot = RequestSnapshot::capture(&request);
        // rejected without a reason
        snapshot.status = RequestStatus::Rejected;
        repository
            .requests
            .write()
            .await
            .insert(request.id().clone(), snapshot);

        let result = repository.find(request.id()).await;
        assert!(matches!(
            result,
            Err(RepositoryError::Corrupted(DomainError::RejectionReasonMismatch(
                RequestStatus::Rejected
            )))
        ));
        assert!(repository.find_by_status(RequestStatus::Rejected).await.is_err());
        assert!(!result.unwrap_err().is_retryable());
        // snapshot fields stay queryable
        assert_eq!(repository.count_by_status(RequestStatus::Rejected).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let repository = InMemoryTrainerAccountRequestRepository::new();
        let first = request("a@x.com");
        repository.save(&first).await.unwrap();
        repository.save(&request("b@x.com")).await.unwrap();

        repository.delete(&first).await.unwrap();
        assert!(repository.find(first.id()).await.unwrap().is_none());
        assert_eq!(repository.count_all().await, 1);

        repository.clear().await;
        assert_eq!(repository.count_all().await, 0);
    }
}
