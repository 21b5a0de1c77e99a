//! Integration tests for the application handlers

use std::sync::Arc;

use async_trait::async_trait;
use trainer_onboarding::domain::{AdminId, DomainError, RequestId, RequestStatus, SkillLevel};
use trainer_onboarding::handlers::{
    AddSkillCommand, ApproveRequestCommand, ApproveRequestHandler, Command, CommandOutcome,
    RejectRequestCommand, RejectRequestHandler, SkillInput, SubmitRequestHandler,
    UpgradeSkillCommand, UpgradeSkillHandler,
};
use trainer_onboarding::publisher::{EventPublisher, PublishError};
use trainer_onboarding::repository::TrainerAccountRequestRepository;
use trainer_onboarding::{Aggregate, AppError, TrainerAccountRequestEvent};

mod common;

use common::{setup, submission, REJECTION_REASON};

#[tokio::test]
async fn test_submit_persists_and_publishes() {
    let ctx = setup();
    let handler = SubmitRequestHandler::new(ctx.repository_handle(), ctx.publisher_handle());

    let result = handler.execute(submission("a@x.com")).await.unwrap();

    assert_eq!(result.status, RequestStatus::PendingValidation);
    assert_eq!(result.skill_ids.len(), 1);

    let stored = ctx.repository.find(&result.request_id).await.unwrap().unwrap();
    assert_eq!(stored.skill_count(), 1);

    let published = ctx.publisher.published().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].event_type(), "TrainerAccountRequestSubmitted");
    assert_eq!(published[0].request_id(), &result.request_id);
}

#[tokio::test]
async fn test_submit_duplicate_email_fails() {
    let ctx = setup();
    let handler = SubmitRequestHandler::new(ctx.repository_handle(), ctx.publisher_handle());
    handler.execute(submission("a@x.com")).await.unwrap();

    let result = handler.execute(submission("  A@X.COM ")).await;

    assert!(matches!(
        result,
        Err(AppError::Domain(DomainError::EmailAlreadyUsed(_)))
    ));
    assert_eq!(ctx.repository.count_all().await, 1);
    assert_eq!(ctx.publisher.published().await.len(), 1);
}

#[tokio::test]
async fn test_submit_without_skills_fails() {
    let ctx = setup();
    let handler = SubmitRequestHandler::new(ctx.repository_handle(), ctx.publisher_handle());
    let mut command = submission("a@x.com");
    command.skills.clear();

    let result = handler.execute(command).await;

    assert!(matches!(result, Err(AppError::Domain(DomainError::RequiredSkills))));
    assert_eq!(ctx.repository.count_all().await, 0);
    assert!(ctx.publisher.published().await.is_empty());
}

#[tokio::test]
async fn test_submit_invalid_skill_level_fails() {
    let ctx = setup();
    let handler = SubmitRequestHandler::new(ctx.repository_handle(), ctx.publisher_handle());
    let command = submission("a@x.com").with_skill("rust", "guru");

    let result = handler.execute(command).await;

    assert!(matches!(
        result,
        Err(AppError::Domain(DomainError::InvalidSkillLevel(_)))
    ));
}

#[tokio::test]
async fn test_reject_then_approve_scenario() {
    let ctx = setup();
    let submit = SubmitRequestHandler::new(ctx.repository_handle(), ctx.publisher_handle());
    let reject = RejectRequestHandler::new(ctx.repository_handle(), ctx.publisher_handle());
    let approve = ApproveRequestHandler::new(ctx.repository_handle(), ctx.publisher_handle());
    let admin = AdminId::generate();

    let submitted = submit.execute(submission("a@x.com")).await.unwrap();
    let rejected = reject
        .execute(RejectRequestCommand::new(
            submitted.request_id.clone(),
            admin.clone(),
            REJECTION_REASON.to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(rejected.status, RequestStatus::Rejected);

    let stored = ctx.repository.find(&submitted.request_id).await.unwrap().unwrap();
    assert_eq!(stored.status(), RequestStatus::Rejected);
    assert_eq!(stored.rejection_reason().unwrap().as_str(), REJECTION_REASON);

    let result = approve
        .execute(ApproveRequestCommand::new(submitted.request_id.clone(), admin.clone()))
        .await;
    assert!(matches!(
        result,
        Err(AppError::Domain(DomainError::NotApprovable { status: RequestStatus::Rejected, .. }))
    ));

    let published = ctx.publisher.published().await;
    assert_eq!(published.len(), 2);
    match &published[1] {
        TrainerAccountRequestEvent::TrainerAccountRequestRejected { rejected_by, reason, .. } => {
            assert_eq!(rejected_by, &admin);
            assert_eq!(reason.as_str(), REJECTION_REASON);
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[tokio::test]
async fn test_approve_publishes_single_event() {
    let ctx = setup();
    let submit = SubmitRequestHandler::new(ctx.repository_handle(), ctx.publisher_handle());
    let approve = ApproveRequestHandler::new(ctx.repository_handle(), ctx.publisher_handle());
    let admin = AdminId::generate();

    let submitted = submit.execute(submission("a@x.com")).await.unwrap();
    approve
        .execute(ApproveRequestCommand::new(submitted.request_id.clone(), admin.clone()))
        .await
        .unwrap();

    let again = approve
        .execute(ApproveRequestCommand::new(submitted.request_id.clone(), admin.clone()))
        .await;
    assert!(again.is_err());

    let published = ctx.publisher.published().await;
    let approvals: Vec<_> = published
        .iter()
        .filter(|event| event.event_type() == "TrainerAccountRequestApproved")
        .collect();
    assert_eq!(approvals.len(), 1);
}

#[tokio::test]
async fn test_reject_with_short_reason_fails() {
    let ctx = setup();
    let submit = SubmitRequestHandler::new(ctx.repository_handle(), ctx.publisher_handle());
    let reject = RejectRequestHandler::new(ctx.repository_handle(), ctx.publisher_handle());

    let submitted = submit.execute(submission("a@x.com")).await.unwrap();
    let result = reject
        .execute(RejectRequestCommand::new(
            submitted.request_id.clone(),
            AdminId::generate(),
            "no".to_string(),
        ))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Domain(DomainError::InvalidRejectionReason(2)))
    ));
    let stored = ctx.repository.find(&submitted.request_id).await.unwrap().unwrap();
    assert_eq!(stored.status(), RequestStatus::PendingValidation);
}

#[tokio::test]
async fn test_review_unknown_request_is_not_found() {
    let ctx = setup();
    let approve = ApproveRequestHandler::new(ctx.repository_handle(), ctx.publisher_handle());

    let result = approve
        .execute(ApproveRequestCommand::new(RequestId::generate(), AdminId::generate()))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_skill_changes_through_dispatcher() {
    let ctx = setup();

    let submitted = match ctx
        .dispatcher
        .dispatch(Command::Submit(submission("a@x.com").with_skill("rust", "beginner")))
        .await
        .unwrap()
    {
        CommandOutcome::Submitted(result) => result,
        other => panic!("unexpected outcome {:?}", other),
    };
    let rust_skill = submitted.skill_ids[1].clone();

    let added = ctx
        .dispatcher
        .dispatch(Command::AddSkill(AddSkillCommand {
            request_id: submitted.request_id.clone(),
            skill: SkillInput::new("go", "intermediate"),
        }))
        .await
        .unwrap();
    assert!(matches!(added, CommandOutcome::SkillChanged(ref r) if r.skill_count == 3));

    let upgrade = UpgradeSkillHandler::new(ctx.repository_handle(), ctx.publisher_handle());
    let upgraded = upgrade
        .execute(UpgradeSkillCommand {
            request_id: submitted.request_id.clone(),
            skill_id: rust_skill.clone(),
            level: "expert".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(upgraded.level, SkillLevel::Expert);

    let downgrade = upgrade
        .execute(UpgradeSkillCommand {
            request_id: submitted.request_id.clone(),
            skill_id: rust_skill.clone(),
            level: "beginner".to_string(),
        })
        .await;
    assert!(matches!(
        downgrade,
        Err(AppError::Domain(DomainError::SkillCannotDowngrade { .. }))
    ));

    let stored = ctx.repository.find(&submitted.request_id).await.unwrap().unwrap();
    assert_eq!(stored.find_skill(&rust_skill).unwrap().level(), SkillLevel::Expert);
    // skill changes record no events
    assert_eq!(ctx.publisher.published().await.len(), 1);
}

#[tokio::test]
async fn test_add_skill_after_approval_fails() {
    let ctx = setup();
    let submitted = match ctx
        .dispatcher
        .dispatch(Command::Submit(submission("a@x.com")))
        .await
        .unwrap()
    {
        CommandOutcome::Submitted(result) => result,
        other => panic!("unexpected outcome {:?}", other),
    };
    ctx.dispatcher
        .dispatch(Command::Approve(ApproveRequestCommand::new(
            submitted.request_id.clone(),
            AdminId::generate(),
        )))
        .await
        .unwrap();

    let result = ctx
        .dispatcher
        .dispatch(Command::AddSkill(AddSkillCommand {
            request_id: submitted.request_id.clone(),
            skill: SkillInput::new("go", "expert"),
        }))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Domain(DomainError::RequestFinalized { .. }))
    ));
}

#[tokio::test]
async fn test_list_pending_and_stats() {
    let ctx = setup();
    let mut ids = Vec::new();
    for email in ["a@x.com", "b@x.com", "c@x.com"] {
        match ctx.dispatcher.dispatch(Command::Submit(submission(email))).await.unwrap() {
            CommandOutcome::Submitted(result) => ids.push(result.request_id),
            other => panic!("unexpected outcome {:?}", other),
        }
    }
    ctx.dispatcher
        .dispatch(Command::Approve(ApproveRequestCommand::new(ids[0].clone(), AdminId::generate())))
        .await
        .unwrap();
    ctx.dispatcher
        .dispatch(Command::Reject(RejectRequestCommand::new(
            ids[1].clone(),
            AdminId::generate(),
            REJECTION_REASON.to_string(),
        )))
        .await
        .unwrap();

    match ctx.dispatcher.dispatch(Command::ListPending).await.unwrap() {
        CommandOutcome::Pending { requests } => {
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0].id(), &ids[2]);
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    match ctx.dispatcher.dispatch(Command::Stats).await.unwrap() {
        CommandOutcome::Stats { counts } => {
            assert_eq!(counts["PENDING_VALIDATION"], 1);
            assert_eq!(counts["APPROVED"], 1);
            assert_eq!(counts["REJECTED"], 1);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _events: &[TrainerAccountRequestEvent]) -> Result<(), PublishError> {
        Err(PublishError::Unavailable("broker down".to_string()))
    }
}

#[tokio::test]
async fn test_publish_failure_hands_back_undelivered_events() {
    let ctx = setup();
    let handler = SubmitRequestHandler::new(ctx.repository_handle(), Arc::new(FailingPublisher));

    let err = handler.execute(submission("a@x.com")).await.unwrap_err();

    let (request_id, pending) = match err {
        AppError::EventsUndelivered {
            request_id,
            pending,
            source: PublishError::Unavailable(_),
        } => (request_id, pending),
        other => panic!("unexpected error {:?}", other),
    };

    // saved before publication was attempted
    let stored = ctx.repository.find(&request_id).await.unwrap().unwrap();
    assert_eq!(stored.status(), RequestStatus::PendingValidation);

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].event_type(), "TrainerAccountRequestSubmitted");
    assert_eq!(pending[0].request_id(), &request_id);

    // redelivery through a working publisher
    ctx.publisher.publish(&pending).await.unwrap();
    assert_eq!(ctx.publisher.published().await, pending);
}

#[tokio::test]
async fn test_review_publish_failure_hands_back_undelivered_events() {
    let ctx = setup();
    let submitted = ctx.dispatcher.dispatch(Command::Submit(submission("a@x.com"))).await.unwrap();
    let request_id = match submitted {
        CommandOutcome::Submitted(result) => result.request_id,
        other => panic!("unexpected outcome {:?}", other),
    };
    let admin = AdminId::generate();
    let approve = ApproveRequestHandler::new(ctx.repository_handle(), Arc::new(FailingPublisher));

    let err = approve
        .execute(ApproveRequestCommand::new(request_id.clone(), admin.clone()))
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "events_undelivered");
    match err.undelivered_events() {
        [TrainerAccountRequestEvent::TrainerAccountRequestApproved { approved_by, .. }] => {
            assert_eq!(approved_by, &admin);
        }
        other => panic!("unexpected pending events {:?}", other),
    }
    let stored = ctx.repository.find(&request_id).await.unwrap().unwrap();
    assert_eq!(stored.status(), RequestStatus::Approved);
}
