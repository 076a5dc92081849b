//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` so they depend only on the
//! driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::UserDirectoryService;
use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(users: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users,
            users_command,
        }
    }

    /// Wire both ports to one [`UserDirectoryService`] over `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use users_api::inbound::http::state::HttpState;
    /// use users_api::outbound::memory::InMemoryUserRepository;
    ///
    /// let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::default()));
    /// let _query = state.users.clone();
    /// ```
    pub fn from_repository(repository: Arc<dyn UserRepository>) -> Self {
        let service = Arc::new(UserDirectoryService::new(repository));
        Self {
            users: service.clone(),
            users_command: service,
        }
    }
}
