//! Domain primitives, services, and ports.
//!
//! Purpose: Define the user record model, the validation rules applied before
//! any write, and the service orchestrating identifier assignment and
//! persistence through the repository port. Types here are transport
//! agnostic; inbound and outbound adapters translate at the edges.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - UserRecord / UserDraft / UserId: the directory entry and its inputs.
//! - UserRecordService: add/edit/delete/get orchestration.
//! - validation: pure field predicates and the `FieldErrors` aggregate.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_record_service;
pub mod validation;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::TraceId;
pub use self::user::{UserDraft, UserId, UserIdError, UserRecord};
pub use self::user_record_service::{ErrorKind, UserRecordError, UserRecordService};
pub use self::validation::FieldErrors;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";
