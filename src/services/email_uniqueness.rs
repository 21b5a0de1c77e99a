//! Email uniqueness policy
//!
//! An email may appear in only one trainer account request. The check reads
//! the repository's point-in-time view: two concurrent submissions for the
//! same email can both pass it. Closing that race needs a uniqueness
//! constraint in the storage backend.

use std::sync::Arc;

use crate::domain::{DomainError, Email};
use crate::error::{AppError, AppResult};
use crate::repository::TrainerAccountRequestRepository;

pub struct EmailUniquenessService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for EmailUniquenessService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> EmailUniquenessService<R>
where
    R: TrainerAccountRequestRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fail with `EmailAlreadyUsed` if a request already uses `email`
    pub async fn verify(&self, email: &Email) -> AppResult<()> {
        if self.repository.exists_by_email(email).await? {
            return Err(DomainError::EmailAlreadyUsed(email.to_string()).into());
        }
        Ok(())
    }

    /// Non-failing variant of [`verify`](Self::verify). Repository errors
    /// still propagate.
    pub async fn is_available(&self, email: &Email) -> AppResult<bool> {
        match self.verify(email).await {
            Ok(()) => Ok(true),
            Err(AppError::Domain(DomainError::EmailAlreadyUsed(_))) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
