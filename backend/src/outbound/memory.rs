//! In-process user record repository.
//!
//! Used when no database URL is configured and by adapter tests. Records are
//! held in registration order, which stands in for `created_at, guid`
//! ordering.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserRecordRepository, UserRecordRepositoryError};
use crate::domain::{UserId, UserRecord};

/// Mutex-guarded vector of records in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryUserRecordRepository {
    records: Mutex<Vec<UserRecord>>,
}

impl InMemoryUserRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> Result<MutexGuard<'_, Vec<UserRecord>>, UserRecordRepositoryError> {
        self.records
            .lock()
            .map_err(|_| UserRecordRepositoryError::store_unavailable("in-memory store poisoned"))
    }
}

#[async_trait]
impl UserRecordRepository for InMemoryUserRecordRepository {
    async fn insert(&self, record: &UserRecord) -> Result<(), UserRecordRepositoryError> {
        let mut records = self.records()?;
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(UserRecordRepositoryError::constraint_violation(format!(
                "duplicate guid {}",
                record.id()
            )));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn update(&self, record: &UserRecord) -> Result<u64, UserRecordRepositoryError> {
        let mut records = self.records()?;
        let Some(slot) = records.iter_mut().find(|existing| existing.id() == record.id()) else {
            return Ok(0);
        };
        *slot = record.clone();
        Ok(1)
    }

    async fn delete(&self, id: &UserId) -> Result<u64, UserRecordRepositoryError> {
        let mut records = self.records()?;
        let before = records.len();
        records.retain(|existing| existing.id() != id);
        Ok((before - records.len()) as u64)
    }

    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserRecord>, UserRecordRepositoryError> {
        Ok(self.records()?.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, UserRecordRepositoryError> {
        Ok(self.records()?.iter().find(|r| r.email() == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, UserRecordRepositoryError> {
        Ok(self.records()?.clone())
    }
}
