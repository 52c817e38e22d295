//! Mapping from pool and Diesel failures to user record repository errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserRecordRepositoryError;

use super::pool::PoolError;

/// Pool failures mean the store cannot be reached.
pub(crate) fn map_pool_error(error: PoolError) -> UserRecordRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    debug!(%message, "user record store checkout failed");
    UserRecordRepositoryError::store_unavailable(message)
}

/// Classify a Diesel failure by the database error kind.
pub(crate) fn map_diesel_error(error: DieselError) -> UserRecordRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(
            kind @ (DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation),
            info,
        ) => {
            let constraint = info.constraint_name().unwrap_or("unnamed constraint");
            UserRecordRepositoryError::constraint_violation(format!(
                "{kind:?} on {constraint}: {}",
                info.message()
            ))
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            info,
        ) => UserRecordRepositoryError::store_unavailable(info.message().to_owned()),
        other => UserRecordRepositoryError::query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DatabaseErrorKind::UniqueViolation)]
    #[case(DatabaseErrorKind::ForeignKeyViolation)]
    #[case(DatabaseErrorKind::NotNullViolation)]
    #[case(DatabaseErrorKind::CheckViolation)]
    fn constraint_failures_map_to_constraint_violation(#[case] kind: DatabaseErrorKind) {
        let error = DieselError::DatabaseError(kind, Box::new("violates constraint".to_owned()));

        let mapped = map_diesel_error(error);

        assert!(matches!(
            mapped,
            UserRecordRepositoryError::ConstraintViolation { .. }
        ));
        assert!(mapped.to_string().contains("violates constraint"));
    }

    #[rstest]
    #[case(DatabaseErrorKind::ClosedConnection)]
    #[case(DatabaseErrorKind::UnableToSendCommand)]
    fn connection_failures_map_to_store_unavailable(#[case] kind: DatabaseErrorKind) {
        let error = DieselError::DatabaseError(kind, Box::new("connection closed".to_owned()));

        assert_eq!(
            map_diesel_error(error),
            UserRecordRepositoryError::store_unavailable("connection closed")
        );
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(DieselError::DatabaseError(
        DatabaseErrorKind::Unknown,
        Box::new("syntax error".to_owned())
    ))]
    fn other_failures_map_to_query(#[case] error: DieselError) {
        assert!(matches!(
            map_diesel_error(error),
            UserRecordRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    #[case(PoolError::checkout("timed out"))]
    #[case(PoolError::build("bad url"))]
    fn pool_failures_map_to_store_unavailable(#[case] error: PoolError) {
        assert!(matches!(
            map_pool_error(error),
            UserRecordRepositoryError::StoreUnavailable { .. }
        ));
    }
}
