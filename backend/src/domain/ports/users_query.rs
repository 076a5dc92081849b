//! Driving port for user reads.
//!
//! Inbound adapters use this port to fetch users without importing
//! persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Use-case port for reading users.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every active user.
    async fn get_all_users(&self) -> Result<Vec<User>, Error>;

    /// A single active user; fails with `not_found` when absent or deleted.
    async fn get_user_by_id(&self, id: UserId) -> Result<User, Error>;
}
