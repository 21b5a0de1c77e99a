//! Domain module
//!
//! Value objects, domain events and domain errors of the trainer onboarding
//! bounded context. Nothing here performs I/O.

pub mod candidate_info;
pub mod email;
pub mod error;
pub mod events;
pub mod full_name;
pub mod ids;
pub mod rejection_reason;
pub mod request_status;
pub mod skill_level;
pub mod skill_name;

pub use candidate_info::CandidateInfo;
pub use email::Email;
pub use error::DomainError;
pub use events::TrainerAccountRequestEvent;
pub use full_name::FullName;
pub use ids::{AdminId, RequestId, SkillId};
pub use rejection_reason::RejectionReason;
pub use request_status::RequestStatus;
pub use skill_level::SkillLevel;
pub use skill_name::SkillName;
