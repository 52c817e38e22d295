//! HTTP inbound adapter exposing the REST API and the map client endpoints.

pub mod error;
pub mod health;
pub mod map_client;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
