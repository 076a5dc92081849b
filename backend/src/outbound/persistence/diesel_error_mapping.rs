//! Shared Diesel error mapping for persistence adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into an adapter-specific connection error constructor.
pub(super) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Constructors used to translate a Diesel failure.
pub(super) struct DieselErrorMapping<Q, C, U> {
    pub query: Q,
    pub connection: C,
    pub unique_violation: U,
}

/// Map Diesel failures into query, connection, or uniqueness errors.
///
/// Only the error kind crosses the boundary; driver messages stay in the
/// debug log.
pub(super) fn map_diesel_error<E, Q, C, U>(
    error: DieselError,
    mapping: DieselErrorMapping<Q, C, U>,
) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
    U: FnOnce() -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            (mapping.unique_violation)()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            (mapping.connection)("database connection error")
        }
        DieselError::NotFound => (mapping.query)("record not found"),
        DieselError::QueryBuilderError(_) => (mapping.query)("database query error"),
        _ => (mapping.query)("database error"),
    }
}
