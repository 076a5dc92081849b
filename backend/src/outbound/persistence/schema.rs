//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Registered users. Rows are never removed; `deleted_at` marks a soft
    /// delete.
    users (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        age -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        /// Set once by a soft delete; `NULL` for active rows.
        deleted_at -> Nullable<Timestamptz>,
    }
}
