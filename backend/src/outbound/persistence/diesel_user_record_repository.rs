//! PostgreSQL-backed `UserRecordRepository` built from parameterised
//! statements.

use async_trait::async_trait;

use crate::domain::ports::{UserRecordRepository, UserRecordRepositoryError};
use crate::domain::{UserId, UserRecord};

use super::pool::DbPool;
use super::record_store::RecordStore;
use super::user_statements::{FieldSet, StatementKind, build};

/// Diesel-backed implementation of the user record repository port.
#[derive(Clone)]
pub struct DieselUserRecordRepository {
    store: RecordStore,
}

impl DieselUserRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            store: RecordStore::new(pool),
        }
    }

    async fn write(
        &self,
        kind: StatementKind,
        fields: &FieldSet,
    ) -> Result<u64, UserRecordRepositoryError> {
        self.store.execute_write(build(kind, fields)?).await
    }

    async fn read(
        &self,
        kind: StatementKind,
        fields: &FieldSet,
    ) -> Result<Vec<UserRecord>, UserRecordRepositoryError> {
        self.store.execute_read(build(kind, fields)?).await
    }
}

#[async_trait]
impl UserRecordRepository for DieselUserRecordRepository {
    async fn insert(&self, record: &UserRecord) -> Result<(), UserRecordRepositoryError> {
        self.write(StatementKind::Add, &FieldSet::for_record(record))
            .await
            .map(|_| ())
    }

    async fn update(&self, record: &UserRecord) -> Result<u64, UserRecordRepositoryError> {
        self.write(StatementKind::Update, &FieldSet::for_record(record))
            .await
    }

    async fn delete(&self, id: &UserId) -> Result<u64, UserRecordRepositoryError> {
        self.write(StatementKind::Delete, &FieldSet::for_id(id)).await
    }

    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserRecord>, UserRecordRepositoryError> {
        let records = self
            .read(StatementKind::SelectById, &FieldSet::for_id(id))
            .await?;
        Ok(records.into_iter().next())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, UserRecordRepositoryError> {
        let records = self
            .read(StatementKind::SelectByEmail, &FieldSet::for_email(email))
            .await?;
        Ok(records.into_iter().next())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, UserRecordRepositoryError> {
        self.read(StatementKind::SelectAll, &FieldSet::new()).await
    }
}
