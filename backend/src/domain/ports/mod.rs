//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`UsersQuery`, `UsersCommand`) are called by inbound
//! adapters. The driven port (`UserRepository`) is implemented by outbound
//! adapters.

mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_command::{CreateUserRequest, UpdateUserRequest, UsersCommand};
pub use users_query::UsersQuery;
