//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. These
//! wrappers mirror their serialised shape for the generated document.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested user does not exist or was deleted.
    #[schema(rename = "not_found")]
    NotFound,
    /// The email address is already used by another active user.
    #[schema(rename = "conflict")]
    Conflict,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "user 7 not found")]
    error: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(rename = "traceId", example = "6f1c1f0e-8d2b-4a53-9d5e-2f7f3b7a9c10")]
    trace_id: Option<String>,
    /// Field-level context for validation failures.
    details: Option<serde_json::Value>,
}
