//! Outbound adapters implementing the user record repository port.
//!
//! - **persistence**: PostgreSQL via Diesel, `diesel-async` and `bb8`
//! - **memory**: process-local store for database-less runs and tests

pub mod memory;
pub mod persistence;
