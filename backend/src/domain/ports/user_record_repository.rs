//! Port abstraction for user record persistence adapters and their errors.
//!
//! Each method maps to exactly one statement against the store, executed and
//! committed atomically. Missing records are normal results: lookups return
//! `None` and mutations report zero affected rows.

use async_trait::async_trait;

use crate::domain::{UserId, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user record repository adapters.
    pub enum UserRecordRepositoryError {
        /// The store could not be reached or a connection could not be checked out.
        StoreUnavailable { message: String } =>
            "user record store unavailable: {message}",
        /// The store rejected a write because it violates a constraint.
        ConstraintViolation { message: String } =>
            "user record store rejected the write: {message}",
        /// A statement was requested that the adapter does not know how to build.
        UnknownOperation { operation: String } =>
            "unknown user record operation: {operation}",
        /// The statement failed for any other reason, including unmappable rows.
        Query { message: String } =>
            "user record query failed: {message}",
    }
}

/// Storage contract for user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRecordRepository: Send + Sync {
    /// Insert a new record.
    async fn insert(&self, record: &UserRecord) -> Result<(), UserRecordRepositoryError>;

    /// Replace every field of the record sharing `record.id()`.
    ///
    /// Returns the number of affected rows; zero when the id is unknown.
    async fn update(&self, record: &UserRecord) -> Result<u64, UserRecordRepositoryError>;

    /// Remove the record with `id`, returning the number of affected rows.
    async fn delete(&self, id: &UserId) -> Result<u64, UserRecordRepositoryError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: &UserId)
    -> Result<Option<UserRecord>, UserRecordRepositoryError>;

    /// Fetch the earliest registered record with `email`.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, UserRecordRepositoryError>;

    /// Fetch every record in registration order.
    async fn list_all(&self) -> Result<Vec<UserRecord>, UserRecordRepositoryError>;
}
