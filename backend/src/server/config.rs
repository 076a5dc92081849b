//! HTTP server configuration object.

use users_api::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Configuration binding `bind_addr` with the in-memory store.
    #[must_use]
    pub fn new(bind_addr: (String, u16)) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Persist users in PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Host and port the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.bind_addr.0.as_str(), self.bind_addr.1)
    }
}
