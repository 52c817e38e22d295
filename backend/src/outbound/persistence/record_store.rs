//! Connection-scoped execution of built user record statements.
//!
//! Each call checks out one pooled connection, runs a single statement in
//! its own transaction and drops the connection guard on every exit path.
//! Failures are classified once here and never retried.

use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use tracing::debug;

use crate::domain::UserRecord;
use crate::domain::ports::UserRecordRepositoryError;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::UserRecordRow;
use super::pool::DbPool;
use super::user_statements::UserStatement;

/// Executes [`UserStatement`]s against the pooled store.
#[derive(Clone)]
pub struct RecordStore {
    pool: DbPool,
}

impl RecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run a mutation and commit it, returning the affected row count.
    pub async fn execute_write(
        &self,
        statement: UserStatement,
    ) -> Result<u64, UserRecordRepositoryError> {
        let kind = statement.kind();
        if kind.returns_rows() {
            return Err(UserRecordRepositoryError::query(format!(
                "{kind} returns rows and cannot run as a write"
            )));
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = conn
            .transaction(|conn| {
                async move { statement.into_query().execute(conn).await }.scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(%kind, affected, "user record statement committed");
        Ok(affected as u64)
    }

    /// Run a query and map every returned row into a [`UserRecord`].
    ///
    /// A row that cannot be mapped fails the whole read with a `Query` error.
    pub async fn execute_read(
        &self,
        statement: UserStatement,
    ) -> Result<Vec<UserRecord>, UserRecordRepositoryError> {
        let kind = statement.kind();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = conn
            .transaction(|conn| {
                async move {
                    statement
                        .into_query()
                        .load::<UserRecordRow>(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(%kind, rows = rows.len(), "user record rows loaded");
        rows.into_iter()
            .map(|row| {
                UserRecord::try_from(row)
                    .map_err(|err| UserRecordRepositoryError::query(err.to_string()))
            })
            .collect()
    }
}
