//! Driving port for user record mutations.
//!
//! Inbound adapters call this port after running field validation; the
//! implementation still rejects blank or malformed required fields before any
//! write reaches the store.

use async_trait::async_trait;

use crate::domain::{Error, UserDraft, UserId};

/// Domain use-case port for creating, replacing, and removing user records.
#[async_trait]
pub trait UserRecordsCommand: Send + Sync {
    /// Register a new user and return its freshly generated identifier.
    async fn add(&self, draft: UserDraft) -> Result<UserId, Error>;

    /// Replace every field of the record identified by `id`.
    ///
    /// Editing an unknown identifier succeeds without effect.
    async fn edit(&self, id: &UserId, draft: UserDraft) -> Result<UserId, Error>;

    /// Remove the record identified by `id`; unknown identifiers are a no-op.
    async fn delete(&self, id: &UserId) -> Result<(), Error>;
}
