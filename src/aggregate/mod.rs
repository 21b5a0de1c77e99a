//! Aggregate module
//!
//! Aggregate Root pattern: the root is the only mutation surface of its
//! consistency boundary and records a domain event for every state change.

pub mod skill;
pub mod trainer_account_request;

pub use skill::Skill;
pub use trainer_account_request::TrainerAccountRequest;

/// Aggregate trait that all aggregate roots implement
pub trait Aggregate {
    /// Global identity of the root
    type Id;

    /// The type of events this aggregate records
    type Event: Clone;

    /// Get the aggregate type name (for storage and logs)
    fn aggregate_type() -> &'static str;

    /// Get the aggregate ID
    fn id(&self) -> &Self::Id;

    /// Copy of the events recorded since the last clear
    fn events(&self) -> Vec<Self::Event>;

    /// Forget recorded events; call once after a successful save
    fn clear_events(&mut self);

    /// Check if there is anything left to publish
    fn has_pending_events(&self) -> bool {
        !self.events().is_empty()
    }
}
