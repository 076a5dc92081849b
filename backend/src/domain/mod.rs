//! Domain primitives, ports, and services.
//!
//! Purpose: define the user entity, its validation rules, and the use-case
//! service. Nothing here depends on Actix or Diesel.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `User` and its value types (`UserId`, `UserName`, `EmailAddress`).
//! - `UserDirectoryService`: implements the user driving ports.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUser, RecordState, User, UserDraft, UserId, UserName, UserValidationError,
};
pub use self::user_service::UserDirectoryService;
