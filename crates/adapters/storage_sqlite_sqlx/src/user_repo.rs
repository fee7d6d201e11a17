//! `SQLite` implementation of [`UserRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use devbook_app::ports::UserRepository;
use devbook_domain::error::{ConflictError, DevbookError};
use devbook_domain::id::UserId;
use devbook_domain::user::User;

use crate::error::{StorageError, decode_error, unique_or_storage};

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;

        Ok(Self(User {
            id: UserId::from_str(&id).map_err(decode_error)?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO users (id, first_name, last_name, email, password_hash) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_BY_EMAIL: &str = "SELECT * FROM users WHERE email = ?";
const SELECT_ALL: &str = "SELECT * FROM users ORDER BY last_name, first_name";
const UPDATE: &str = "UPDATE users SET first_name = ?, last_name = ?, email = ?, password_hash = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM users WHERE id = ?";

/// `SQLite`-backed user repository.
///
/// The `UNIQUE` constraint on `users.email` turns a lost registration race
/// into [`ConflictError::EmailTaken`].
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(&self, user: User) -> impl Future<Output = Result<User, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(user.id.to_string())
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(&user.email)
                .bind(&user.password_hash)
                .execute(&pool)
                .await
                .map_err(|err| {
                    unique_or_storage(err, || ConflictError::EmailTaken(user.email.clone()))
                })?;

            Ok(user)
        }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, DevbookError>> + Send {
        let pool = self.pool.clone();
        let email = email.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_EMAIL)
                .bind(email)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, user: User) -> impl Future<Output = Result<User, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(user.id.to_string())
                .execute(&pool)
                .await
                .map_err(|err| {
                    unique_or_storage(err, || ConflictError::EmailTaken(user.email.clone()))
                })?;

            Ok(user)
        }
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
