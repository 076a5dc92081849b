//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Connections come from a `bb8` pool of `diesel-async` connections. Row
//! structs (`models.rs`) and table definitions (`schema.rs`) stay private to
//! this module; adapters only translate between them and domain types.
//!
//! # Example
//!
//! ```ignore
//! use users_api::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError,
};
