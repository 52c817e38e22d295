//! User directory service library.
//!
//! Layout follows ports and adapters: [`domain`] holds the record model,
//! validation and service; [`outbound`] adapts the repository port to
//! PostgreSQL or memory; [`inbound`] exposes the service over HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
