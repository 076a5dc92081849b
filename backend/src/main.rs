//! Users API entry-point: loads settings, prepares the store, and serves
//! the REST endpoints, probes, and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_api::inbound::http::health::HealthState;
use users_api::outbound::persistence::{DbPool, run_migrations};
use users_api::settings::ServiceSettings;

/// Prepare the database, when configured, and attach its pool.
async fn attach_store(
    settings: &ServiceSettings,
    config: ServerConfig,
) -> std::io::Result<ServerConfig> {
    let Some(pool_config) = settings.pool_config() else {
        return Ok(config);
    };
    run_migrations(pool_config.database_url())
        .await
        .map_err(std::io::Error::other)?;
    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let config = attach_store(&settings, ServerConfig::new(settings.bind_address())).await?;

    let (host, port) = config.bind_addr();
    info!(host, port, "starting users API");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

#[cfg(test)]
mod tests;
