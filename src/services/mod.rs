//! Domain services
//!
//! Stateless policies that need more than a single aggregate.

mod email_uniqueness;

pub use email_uniqueness::EmailUniquenessService;
