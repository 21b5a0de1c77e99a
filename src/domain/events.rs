//! Domain Events
//!
//! Immutable facts recorded by the trainer account request aggregate.
//! Every event carries only value-object fields and the instant it occurred.
//! Delivery may repeat, so listeners must be idempotent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AdminId, Email, RejectionReason, RequestId};

/// Trainer account request events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TrainerAccountRequestEvent {
    /// A candidate submitted a request
    TrainerAccountRequestSubmitted {
        request_id: RequestId,
        candidate_email: Email,
        occurred_at: DateTime<Utc>,
    },

    /// An administrator approved the request
    TrainerAccountRequestApproved {
        request_id: RequestId,
        approved_by: AdminId,
        occurred_at: DateTime<Utc>,
    },

    /// An administrator rejected the request
    TrainerAccountRequestRejected {
        request_id: RequestId,
        rejected_by: AdminId,
        reason: RejectionReason,
        occurred_at: DateTime<Utc>,
    },
}

impl TrainerAccountRequestEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TrainerAccountRequestSubmitted { .. } => "TrainerAccountRequestSubmitted",
            Self::TrainerAccountRequestApproved { .. } => "TrainerAccountRequestApproved",
            Self::TrainerAccountRequestRejected { .. } => "TrainerAccountRequestRejected",
        }
    }

    /// Get the request ID this event relates to
    pub fn request_id(&self) -> &RequestId {
        match self {
            Self::TrainerAccountRequestSubmitted { request_id, .. } => request_id,
            Self::TrainerAccountRequestApproved { request_id, .. } => request_id,
            Self::TrainerAccountRequestRejected { request_id, .. } => request_id,
        }
    }

    /// When the fact happened
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::TrainerAccountRequestSubmitted { occurred_at, .. } => *occurred_at,
            Self::TrainerAccountRequestApproved { occurred_at, .. } => *occurred_at,
            Self::TrainerAccountRequestRejected { occurred_at, .. } => *occurred_at,
        }
    }
}
