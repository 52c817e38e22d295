//! Driving port for user record reads.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserRecord};

/// Domain use-case port for reading user records.
///
/// Absent records are `Ok(None)`; adapters decide whether that becomes a
/// not-found response.
#[async_trait]
pub trait UserRecordsQuery: Send + Sync {
    /// Fetch one record by identifier.
    async fn get(&self, id: &UserId) -> Result<Option<UserRecord>, Error>;

    /// Fetch the earliest registered record using `email`.
    async fn get_by_email(&self, email: &str) -> Result<Option<UserRecord>, Error>;

    /// Fetch every record in registration order.
    async fn get_all(&self) -> Result<Vec<UserRecord>, Error>;
}
