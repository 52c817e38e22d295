//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{Error, FieldErrors, UserId};

/// Validation error codes placed in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    MissingField,
    ValidationFailed,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::MissingField => "missing_field",
            ErrorCode::ValidationFailed => "validation_failed",
        }
    }
}

pub(crate) fn invalid_uuid_error(field: &str, value: &str) -> Error {
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

/// Wrap per-field messages in the shared error envelope.
pub(crate) fn field_errors_error(fields: &FieldErrors) -> Error {
    Error::invalid_request("user record failed validation").with_details(json!({
        "code": ErrorCode::ValidationFailed.as_str(),
        "fields": fields,
    }))
}

pub(crate) fn parse_user_id(value: &str) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| invalid_uuid_error("id", value))
}
