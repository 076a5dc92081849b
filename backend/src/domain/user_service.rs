//! User directory service.
//!
//! Implements the user driving ports on top of a [`UserRepository`].
//! Repository failures pass through kind-for-kind; the only business logic
//! is the update merge.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateUserRequest, UpdateUserRequest, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{Error, NewUser, User, UserId};

/// Service implementing [`UsersQuery`] and [`UsersCommand`].
///
/// The fetch and write inside [`UsersCommand::update_user`] are not wrapped
/// in a transaction; concurrent updates to one user are last-write-wins.
pub struct UserDirectoryService<R: ?Sized> {
    user_repo: Arc<R>,
}

impl<R: ?Sized> Clone for UserDirectoryService<R> {
    fn clone(&self) -> Self {
        Self {
            user_repo: Arc::clone(&self.user_repo),
        }
    }
}

impl<R: ?Sized> UserDirectoryService<R> {
    /// Create a service over the given repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersQuery for UserDirectoryService<R>
where
    R: UserRepository + ?Sized,
{
    async fn get_all_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.user_repo.get_all().await?)
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, Error> {
        Ok(self.user_repo.get_by_id(id).await?)
    }
}

#[async_trait]
impl<R> UsersCommand for UserDirectoryService<R>
where
    R: UserRepository + ?Sized,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let CreateUserRequest { name, email, age } = request;
        let new_user = NewUser { name, email, age };

        let user = self.user_repo.create(&new_user).await?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> Result<User, Error> {
        let mut user = self.user_repo.get_by_id(id).await?;

        if request.is_empty() {
            debug!(user_id = %id, "update carried no present fields");
            return Ok(user);
        }

        request.apply_to(&mut user);
        Ok(self.user_repo.update(&user).await?)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        self.user_repo.delete(id).await?;
        info!(user_id = %id, "user soft-deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
