//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Soft-deleted rows are filtered out of every statement, so an update or
//! delete aimed at one touches zero rows and reports `NotFound`. Email
//! uniqueness among active rows is enforced by the
//! `users_email_active_key` partial index.

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserDraft, UserId, UserName};

use super::diesel_error_mapping::{DieselErrorMapping, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, |message| UserPersistenceError::connection(message))
}

fn diesel_error(error: diesel::result::Error, email: &str) -> UserPersistenceError {
    map_diesel_error(
        error,
        DieselErrorMapping {
            query: |message: &'static str| UserPersistenceError::query(message),
            connection: |message: &'static str| UserPersistenceError::connection(message),
            unique_violation: || UserPersistenceError::conflict(email),
        },
    )
}

/// Reads never raise uniqueness violations; the email is only a label.
fn read_error(error: diesel::result::Error) -> UserPersistenceError {
    diesel_error(error, "")
}

/// Identifiers beyond `i64::MAX` cannot exist in the table.
fn db_id(id: UserId) -> Option<i64> {
    i64::try_from(id.get()).ok()
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let invalid =
        |field: &str| UserPersistenceError::query(format!("stored user has invalid {field}"));
    let id = u64::try_from(row.id).map_err(|_| invalid("id"))?;
    Ok(User::new(UserDraft {
        id: UserId::new(id),
        name: UserName::new(row.name).map_err(|_| invalid("name"))?,
        email: EmailAddress::new(row.email).map_err(|_| invalid("email"))?,
        age: row.age,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::deleted_at.is_null())
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(read_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn get_by_id(&self, id: UserId) -> Result<User, UserPersistenceError> {
        let Some(key) = db_id(id) else {
            return Err(UserPersistenceError::not_found(id));
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(key))
            .filter(users::deleted_at.is_null())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(read_error)?;

        row.map_or_else(|| Err(UserPersistenceError::not_found(id)), row_to_user)
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let email = user.email.as_ref();

        let row = NewUserRow {
            name: user.name.as_ref(),
            email,
            age: user.age,
        };

        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| diesel_error(err, email))?;

        row_to_user(stored)
    }

    async fn update(&self, user: &User) -> Result<User, UserPersistenceError> {
        let id = user.id();
        let Some(key) = db_id(id) else {
            return Err(UserPersistenceError::not_found(id));
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let email = user.email().as_ref();

        let changes = UserUpdate {
            name: user.name().as_ref(),
            email,
            age: user.age(),
        };

        let stored: Option<UserRow> = diesel::update(
            users::table
                .filter(users::id.eq(key))
                .filter(users::deleted_at.is_null()),
        )
        .set((&changes, users::updated_at.eq(now)))
        .returning(UserRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(|err| diesel_error(err, email))?;

        stored.map_or_else(|| Err(UserPersistenceError::not_found(id)), row_to_user)
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let Some(key) = db_id(id) else {
            return Err(UserPersistenceError::not_found(id));
        };
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let affected = diesel::update(
            users::table
                .filter(users::id.eq(key))
                .filter(users::deleted_at.is_null()),
        )
        .set(users::deleted_at.eq(now))
        .execute(&mut conn)
        .await
        .map_err(read_error)?;

        if affected == 0 {
            return Err(UserPersistenceError::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Mapping coverage; statement behaviour needs a live database.
    use chrono::Utc;
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;

    use super::super::diesel_error_mapping::test_support::database_error;
    use super::*;

    fn row(id: i64, name: &str, email: &str) -> UserRow {
        let at = Utc::now();
        UserRow {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
            age: 20,
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    fn unique_violation_names_the_email() {
        let error = diesel_error(
            database_error(DatabaseErrorKind::UniqueViolation, "users_email_active_key"),
            "ann@x.com",
        );
        assert_eq!(error, UserPersistenceError::conflict("ann@x.com"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let error = read_error(database_error(DatabaseErrorKind::ClosedConnection, "gone"));
        assert!(matches!(error, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn pool_checkout_failure_maps_to_connection_error() {
        let error = pool_error(PoolError::checkout("timed out"));
        assert_eq!(error, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn row_converts_to_domain_user() {
        let user = row_to_user(row(7, "Ann", "ann@x.com")).expect("valid row");
        assert_eq!(user.id(), UserId::new(7));
        assert_eq!(user.name().as_ref(), "Ann");
        assert_eq!(user.email().as_ref(), "ann@x.com");
    }

    #[rstest]
    #[case(row(-1, "Ann", "ann@x.com"), "id")]
    #[case(row(1, "", "ann@x.com"), "name")]
    #[case(row(1, "Ann", "ann"), "email")]
    fn corrupt_rows_map_to_query_error(#[case] row: UserRow, #[case] field: &str) {
        let error = row_to_user(row).expect_err("corrupt row");
        assert_eq!(
            error,
            UserPersistenceError::query(format!("stored user has invalid {field}"))
        );
    }

    #[rstest]
    fn out_of_range_identifiers_have_no_row() {
        assert_eq!(db_id(UserId::new(u64::MAX)), None);
        assert_eq!(db_id(UserId::new(42)), Some(42));
    }
}
