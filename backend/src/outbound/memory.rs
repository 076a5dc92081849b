//! In-process `UserRepository` used when no database is configured.
//!
//! Records live in a mutex-guarded map keyed by identifier. Deleted records
//! stay in the map with [`RecordState::Deleted`] so identifiers are never
//! reused, matching the PostgreSQL sequence.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, RecordState, User, UserDraft, UserId};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    state: RecordState,
}

#[derive(Debug, Default)]
struct Records {
    last_id: u64,
    users: BTreeMap<UserId, StoredUser>,
}

impl Records {
    fn active(&self, id: UserId) -> Option<&StoredUser> {
        self.users.get(&id).filter(|stored| stored.state.is_active())
    }

    fn active_mut(&mut self, id: UserId) -> Option<&mut StoredUser> {
        self.users
            .get_mut(&id)
            .filter(|stored| stored.state.is_active())
    }

    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users.values().any(|stored| {
            stored.state.is_active()
                && Some(stored.user.id()) != except
                && stored.user.email().as_ref() == email
        })
    }
}

/// Mutex-guarded in-memory user store.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    records: Arc<Mutex<Records>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserRepository {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Arc::new(Mutex::new(Records::default())),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>, UserPersistenceError> {
        self.records
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(Arc::new(mockable::DefaultClock))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let records = self.lock()?;
        Ok(records
            .users
            .values()
            .filter(|stored| stored.state.is_active())
            .map(|stored| stored.user.clone())
            .collect())
    }

    async fn get_by_id(&self, id: UserId) -> Result<User, UserPersistenceError> {
        let records = self.lock()?;
        records
            .active(id)
            .map(|stored| stored.user.clone())
            .ok_or_else(|| UserPersistenceError::not_found(id))
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut records = self.lock()?;
        if records.email_taken(user.email.as_ref(), None) {
            return Err(UserPersistenceError::conflict(user.email.as_ref()));
        }

        let next = records
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user identifiers exhausted"))?;
        records.last_id = next;

        let now = self.clock.utc();
        let stored = User::new(UserDraft {
            id: UserId::new(next),
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age,
            created_at: now,
            updated_at: now,
        });
        records.users.insert(
            stored.id(),
            StoredUser {
                user: stored.clone(),
                state: RecordState::Active,
            },
        );
        Ok(stored)
    }

    async fn update(&self, user: &User) -> Result<User, UserPersistenceError> {
        let id = user.id();
        let now = self.clock.utc();
        let mut records = self.lock()?;

        if records.active(id).is_none() {
            return Err(UserPersistenceError::not_found(id));
        }
        if records.email_taken(user.email().as_ref(), Some(id)) {
            return Err(UserPersistenceError::conflict(user.email().as_ref()));
        }

        let stored = records
            .active_mut(id)
            .ok_or_else(|| UserPersistenceError::not_found(id))?;
        stored.user.set_name(user.name().clone());
        stored.user.set_email(user.email().clone());
        stored.user.set_age(user.age());
        stored.user.touch(now);
        Ok(stored.user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let now = self.clock.utc();
        let mut records = self.lock()?;
        let stored = records
            .active_mut(id)
            .ok_or_else(|| UserPersistenceError::not_found(id))?;
        stored.state = RecordState::Deleted { at: now };
        Ok(())
    }
}
