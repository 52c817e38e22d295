//! User record service implementing the record driving ports.
//!
//! Orchestrates the write path (validate, assign identifier, persist) and the
//! read path (lookup, map absent records to `None`). Store failures surface
//! unchanged as [`UserRecordError::Repository`]; nothing is retried because
//! the statements are not guaranteed idempotent on re-execution.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    UserRecordRepository, UserRecordRepositoryError, UserRecordsCommand, UserRecordsQuery,
};
use crate::domain::validation::validate_required_fields;
use crate::domain::{Error, FieldErrors, UserDraft, UserId, UserRecord};

/// Failure category of a user record operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input failed field validation; nothing reached the store.
    ValidationFailed,
    /// A statement kind was requested that the store adapter does not know.
    UnknownOperation,
    /// The store could not be reached.
    StoreUnavailable,
    /// The store rejected the write.
    ConstraintViolation,
    /// The statement failed for another reason.
    Query,
}

/// Errors returned by [`UserRecordService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRecordError {
    /// Field-level validation failed.
    #[error("user record validation failed: {0}")]
    ValidationFailed(FieldErrors),
    /// The repository reported a failure.
    #[error(transparent)]
    Repository(#[from] UserRecordRepositoryError),
}

impl UserRecordError {
    /// Failure category for callers that branch on the kind of error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationFailed(_) => ErrorKind::ValidationFailed,
            Self::Repository(UserRecordRepositoryError::UnknownOperation { .. }) => {
                ErrorKind::UnknownOperation
            }
            Self::Repository(UserRecordRepositoryError::StoreUnavailable { .. }) => {
                ErrorKind::StoreUnavailable
            }
            Self::Repository(UserRecordRepositoryError::ConstraintViolation { .. }) => {
                ErrorKind::ConstraintViolation
            }
            Self::Repository(UserRecordRepositoryError::Query { .. }) => ErrorKind::Query,
        }
    }
}

impl From<UserRecordError> for Error {
    fn from(error: UserRecordError) -> Self {
        match error {
            UserRecordError::ValidationFailed(fields) => {
                Error::invalid_request("user record failed validation").with_details(json!({
                    "code": "validation_failed",
                    "fields": fields,
                }))
            }
            UserRecordError::Repository(UserRecordRepositoryError::StoreUnavailable {
                message,
            }) => Error::service_unavailable(format!("user record store unavailable: {message}")),
            UserRecordError::Repository(UserRecordRepositoryError::ConstraintViolation {
                message,
            }) => Error::conflict(format!("user record rejected by store: {message}")),
            UserRecordError::Repository(UserRecordRepositoryError::UnknownOperation {
                operation,
            }) => Error::internal(format!("unknown user record operation: {operation}")),
            UserRecordError::Repository(UserRecordRepositoryError::Query { message }) => {
                Error::internal(format!("user record query failed: {message}"))
            }
        }
    }
}

/// User record service implementing the driving ports.
///
/// The repository is injected at construction; the service holds no other
/// state, so clones share the same store handle.
#[derive(Clone)]
pub struct UserRecordService<R> {
    repository: Arc<R>,
}

impl<R> UserRecordService<R> {
    /// Create a new service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> UserRecordService<R>
where
    R: UserRecordRepository,
{
    fn ensure_valid(draft: &UserDraft) -> Result<(), UserRecordError> {
        validate_required_fields(&draft.name, &draft.email)
            .into_result()
            .map_err(|fields| {
                warn!(%fields, "rejecting user record before store call");
                UserRecordError::ValidationFailed(fields)
            })
    }

    /// Register a new user and return the generated identifier.
    ///
    /// Duplicate emails are accepted.
    pub async fn add(&self, draft: UserDraft) -> Result<UserId, UserRecordError> {
        Self::ensure_valid(&draft)?;
        let id = UserId::random();
        let record = UserRecord::new(id.clone(), draft);
        self.repository.insert(&record).await?;
        info!(user_id = %id, "user record added");
        Ok(id)
    }

    /// Replace every field of the record identified by `id`.
    ///
    /// An unknown `id` affects zero rows and still returns `Ok(id)`.
    pub async fn edit(&self, id: &UserId, draft: UserDraft) -> Result<UserId, UserRecordError> {
        Self::ensure_valid(&draft)?;
        let record = UserRecord::new(id.clone(), draft);
        let affected = self.repository.update(&record).await?;
        if affected == 0 {
            debug!(user_id = %id, "edit matched no user record");
        } else {
            info!(user_id = %id, "user record edited");
        }
        Ok(id.clone())
    }

    /// Remove the record identified by `id`; unknown ids are a no-op.
    pub async fn delete(&self, id: &UserId) -> Result<(), UserRecordError> {
        let affected = self.repository.delete(id).await?;
        if affected == 0 {
            debug!(user_id = %id, "delete matched no user record");
        } else {
            info!(user_id = %id, "user record deleted");
        }
        Ok(())
    }

    /// Fetch one record by identifier.
    pub async fn get(&self, id: &UserId) -> Result<Option<UserRecord>, UserRecordError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Fetch the earliest registered record with `email`.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserRecordError> {
        Ok(self.repository.find_by_email(email).await?)
    }

    /// Fetch every record in registration order.
    pub async fn get_all(&self) -> Result<Vec<UserRecord>, UserRecordError> {
        Ok(self.repository.list_all().await?)
    }
}

#[async_trait]
impl<R> UserRecordsCommand for UserRecordService<R>
where
    R: UserRecordRepository,
{
    async fn add(&self, draft: UserDraft) -> Result<UserId, Error> {
        Ok(UserRecordService::add(self, draft).await?)
    }

    async fn edit(&self, id: &UserId, draft: UserDraft) -> Result<UserId, Error> {
        Ok(UserRecordService::edit(self, id, draft).await?)
    }

    async fn delete(&self, id: &UserId) -> Result<(), Error> {
        Ok(UserRecordService::delete(self, id).await?)
    }
}

#[async_trait]
impl<R> UserRecordsQuery for UserRecordService<R>
where
    R: UserRecordRepository,
{
    async fn get(&self, id: &UserId) -> Result<Option<UserRecord>, Error> {
        Ok(UserRecordService::get(self, id).await?)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<UserRecord>, Error> {
        Ok(UserRecordService::get_by_email(self, email).await?)
    }

    async fn get_all(&self) -> Result<Vec<UserRecord>, Error> {
        Ok(UserRecordService::get_all(self).await?)
    }
}

#[cfg(test)]
#[path = "user_record_service_tests.rs"]
mod tests;
