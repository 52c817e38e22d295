//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_record_repository;
mod user_records_command;
mod user_records_query;

#[cfg(test)]
pub use user_record_repository::MockUserRecordRepository;
pub use user_record_repository::{UserRecordRepository, UserRecordRepositoryError};
pub use user_records_command::UserRecordsCommand;
pub use user_records_query::UserRecordsQuery;
