//! Driven port for user persistence.
//!
//! Adapters own identifier and timestamp assignment. Soft-deleted records are
//! invisible through every method: reads skip them, and updates or deletes
//! aimed at them fail with [`UserPersistenceError::NotFound`].

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// No active record carries the identifier.
    #[error("user {id} not found")]
    NotFound { id: UserId },
    /// Another active record already uses the email address.
    #[error("email {email} is already in use")]
    Conflict { email: String },
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    pub fn not_found(id: UserId) -> Self {
        Self::NotFound { id }
    }

    pub fn conflict(email: impl Into<String>) -> Self {
        Self::Conflict {
            email: email.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<UserPersistenceError> for Error {
    fn from(value: UserPersistenceError) -> Self {
        match &value {
            UserPersistenceError::NotFound { .. } => Error::not_found(value.to_string()),
            UserPersistenceError::Conflict { .. } => Error::conflict(value.to_string()),
            UserPersistenceError::Connection { .. } | UserPersistenceError::Query { .. } => {
                Error::internal(value.to_string())
            }
        }
    }
}

/// Record store for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All active users ordered by identifier.
    async fn get_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// The active user with `id`.
    async fn get_by_id(&self, id: UserId) -> Result<User, UserPersistenceError>;

    /// Persist a new user, assigning its identifier and timestamps.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Persist the full current representation of an existing user.
    async fn update(&self, user: &User) -> Result<User, UserPersistenceError>;

    /// Soft-delete the active user with `id`.
    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError>;
}
