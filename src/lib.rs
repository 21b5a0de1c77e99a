//! Trainer Onboarding Library
//!
//! Lifecycle of a trainer account request: a candidate submits, an
//! administrator approves or rejects, and every transition is recorded as a
//! domain event.

pub mod aggregate;
pub mod config;
pub mod domain;
mod error;
pub mod handlers;
pub mod publisher;
pub mod repository;
pub mod services;

pub use aggregate::{Aggregate, Skill, TrainerAccountRequest};
pub use config::Config;
pub use domain::{DomainError, TrainerAccountRequestEvent};
pub use error::{AppError, AppResult, ErrorResponse};
