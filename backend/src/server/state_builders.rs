//! Builder selecting the user store behind the HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};

use users_api::domain::ports::UserRepository;
use users_api::inbound::http::state::HttpState;
use users_api::outbound::memory::InMemoryUserRepository;
use users_api::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Wire the handlers to PostgreSQL when a pool is configured, otherwise to
/// a process-local store.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let repository: Arc<dyn UserRepository> = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL user store");
            Arc::new(DieselUserRepository::new(pool.clone()))
        }
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            Arc::new(InMemoryUserRepository::new(Arc::new(DefaultClock)))
        }
    };
    HttpState::from_repository(repository)
}
