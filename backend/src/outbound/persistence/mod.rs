//! PostgreSQL persistence adapters using Diesel.
//!
//! Statements are built by [`user_statements`] with every value bound as a
//! parameter, executed by [`RecordStore`] on `diesel-async` connections
//! checked out from a `bb8` pool, and exposed to the domain through
//! [`DieselUserRecordRepository`]. Row structs and the table definition stay
//! private to this module.
//!
//! ```ignore
//! use user_directory::outbound::persistence::{DbPool, DieselUserRecordRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repository = DieselUserRecordRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_user_record_repository;
mod models;
mod pool;
mod record_store;
mod schema;
pub mod user_statements;

pub use diesel_user_record_repository::DieselUserRecordRepository;
pub use pool::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
pub use record_store::RecordStore;
