//! Service configuration loaded via OrthoConfig.
//!
//! Values layer from CLI flags, `USERS_API_*` environment variables, and
//! configuration files.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Settings controlling the listener and the record store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct ServiceSettings {
    /// PostgreSQL connection URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Interface to bind; `0.0.0.0` when unset.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

impl ServiceSettings {
    /// Host and port to bind, with defaults applied.
    pub fn bind_address(&self) -> (String, u16) {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST).to_owned();
        (host, self.port)
    }

    /// Pool configuration, when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().filter(|url| !url.is_empty())?;
        Some(PoolConfig::new(url).with_max_size(self.db_max_connections))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for service configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use crate::outbound::persistence::DEFAULT_MAX_SIZE;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "USERS_API_DATABASE_URL",
        "USERS_API_HOST",
        "USERS_API_PORT",
        "USERS_API_DB_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> ServiceSettings {
        ServiceSettings::load_from_iter([OsString::from("users-api")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_address(), ("0.0.0.0".to_owned(), 8080));
        assert_eq!(settings.db_max_connections, DEFAULT_MAX_SIZE);
        assert!(settings.pool_config().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (VARS[0], Some("postgres://db/users".to_owned())),
            (VARS[1], Some("127.0.0.1".to_owned())),
            (VARS[2], Some("9090".to_owned())),
            (VARS[3], Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_address(), ("127.0.0.1".to_owned(), 9090));
        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://db/users");
        assert_eq!(pool.max_size(), 3);
    }

    #[rstest]
    fn empty_database_url_selects_memory_store() {
        let _guard = lock_env([
            (VARS[0], Some(String::new())),
            (VARS[1], None),
            (VARS[2], None),
            (VARS[3], None),
        ]);

        assert!(load_from_empty_args().pool_config().is_none());
    }
}
