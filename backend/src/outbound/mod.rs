//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL-backed repository using Diesel.
//! - **memory**: in-process repository used without a database.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
