//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::{UserDraft, UserId, UserRecord};

use super::schema::users;

/// Row returned by the `select-*` statements.
#[derive(Debug, Clone, PartialEq, QueryableByName)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRecordRow {
    pub guid: String,
    pub name: String,
    pub email: String,
    pub website: String,
    pub latitude: f64,
    pub longitude: f64,
    pub email_updates: i32,
}

/// Reasons a stored row cannot become a [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum RowMappingError {
    #[error("stored guid {guid:?} is not a valid user id")]
    InvalidGuid { guid: String },
    #[error("stored email_updates value {value} is not 0 or 1")]
    InvalidFlag { value: i32 },
}

impl TryFrom<UserRecordRow> for UserRecord {
    type Error = RowMappingError;

    fn try_from(row: UserRecordRow) -> Result<Self, Self::Error> {
        let UserRecordRow {
            guid,
            name,
            email,
            website,
            latitude,
            longitude,
            email_updates,
        } = row;
        let id = UserId::new(&guid).map_err(|_| RowMappingError::InvalidGuid { guid })?;
        let email_updates = match email_updates {
            0 => false,
            1 => true,
            value => return Err(RowMappingError::InvalidFlag { value }),
        };
        Ok(UserRecord::new(
            id,
            UserDraft {
                name,
                email,
                website,
                latitude,
                longitude,
                email_updates,
            },
        ))
    }
}
