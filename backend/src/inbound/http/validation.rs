//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` [`Error`] whose details carry
//! the offending `field`, a machine-readable `code`, and the rejected
//! `value` where echoing it is safe.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{Error, UserId, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyField,
    InvalidEmail,
    InvalidId,
    InvalidBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::EmptyField => "empty_field",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidBody => "invalid_body",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const ID: FieldName = FieldName::new("id");
pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const EMAIL: FieldName = FieldName::new("email");

fn field_error(field: FieldName, message: impl Into<String>, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_error_with_value(
    field: FieldName,
    message: impl Into<String>,
    code: ErrorCode,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
        "value": value,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(field, format!("missing required field: {name}"), ErrorCode::MissingField)
}

/// Translate a domain validation failure on `value` into an HTTP error.
pub(crate) fn user_field_error(error: UserValidationError, value: &str) -> Error {
    match error {
        UserValidationError::InvalidId => {
            field_error_with_value(ID, error.to_string(), ErrorCode::InvalidId, value)
        }
        UserValidationError::EmptyName => field_error(NAME, error.to_string(), ErrorCode::EmptyField),
        UserValidationError::EmptyEmail => {
            field_error(EMAIL, error.to_string(), ErrorCode::EmptyField)
        }
        UserValidationError::InvalidEmail => {
            field_error_with_value(EMAIL, error.to_string(), ErrorCode::InvalidEmail, value)
        }
    }
}

/// Parse a path segment into a [`UserId`].
pub(crate) fn parse_user_id(value: &str) -> Result<UserId, Error> {
    value
        .parse::<UserId>()
        .map_err(|error| user_field_error(error, value))
}

fn json_error(err: JsonPayloadError) -> Error {
    let message = match &err {
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("request body is not valid JSON: {inner}"),
        other => format!("request body could not be read: {other}"),
    };
    Error::invalid_request(message).with_details(json!({
        "code": ErrorCode::InvalidBody.as_str(),
    }))
}

/// JSON extractor configuration that reports body failures in the shared
/// error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| json_error(err).into())
}
