//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::users;

/// Active user row as read from the users table.
///
/// `deleted_at` is not selected: every query filters on it instead.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub age: i32,
}

/// Changeset carrying the full mutable state of a user.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub age: i32,
}
