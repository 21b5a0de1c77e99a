//! RequestStatus
//!
//! Closed state machine of a trainer account request.
//!
//! ```text
//! PENDING_VALIDATION -> APPROVED
//! PENDING_VALIDATION -> REJECTED
//! ```
//! APPROVED and REJECTED are terminal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    #[default]
    PendingValidation,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Every status, in lifecycle order
    pub const ALL: [RequestStatus; 3] = [
        RequestStatus::PendingValidation,
        RequestStatus::Approved,
        RequestStatus::Rejected,
    ];

    /// Transition table; every predicate below is derived from it.
    pub fn allowed_transitions(&self) -> &'static [RequestStatus] {
        match self {
            RequestStatus::PendingValidation => {
                &[RequestStatus::Approved, RequestStatus::Rejected]
            }
            RequestStatus::Approved => &[],
            RequestStatus::Rejected => &[],
        }
    }

    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn can_be_approved(&self) -> bool {
        self.can_transition_to(RequestStatus::Approved)
    }

    pub fn can_be_rejected(&self) -> bool {
        self.can_transition_to(RequestStatus::Rejected)
    }

    /// Terminal: no outgoing transitions
    pub fn is_final(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::PendingValidation => "PENDING_VALIDATION",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| DomainError::InvalidStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_can_be_approved_or_rejected() {
        let status = RequestStatus::PendingValidation;
        assert!(status.can_be_approved());
        assert!(status.can_be_rejected());
        assert!(!status.is_final());
    }

    #[test]
    fn test_terminal_states() {
        for status in [RequestStatus::Approved, RequestStatus::Rejected] {
            assert!(status.is_final());
            assert!(!status.can_be_approved());
            assert!(!status.can_be_rejected());
        }
    }

    #[test]
    fn test_terminal_states_unreachable_from_each_other() {
        assert!(!RequestStatus::Approved.can_transition_to(RequestStatus::Rejected));
        assert!(!RequestStatus::Rejected.can_transition_to(RequestStatus::Approved));
        assert!(!RequestStatus::Approved.can_transition_to(RequestStatus::PendingValidation));
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(RequestStatus::default(), RequestStatus::PendingValidation);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "pending_validation".parse::<RequestStatus>().unwrap(),
            RequestStatus::PendingValidation
        );
        assert_eq!("APPROVED".parse::<RequestStatus>().unwrap(), RequestStatus::Approved);
        assert!(matches!(
            "archived".parse::<RequestStatus>(),
            Err(DomainError::InvalidStatus(_))
        ));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&RequestStatus::PendingValidation).unwrap();
        assert_eq!(json, r#""PENDING_VALIDATION""#);

        let back: RequestStatus = serde_json::from_str(r#""REJECTED""#).unwrap();
        assert_eq!(back, RequestStatus::Rejected);
    }
}
