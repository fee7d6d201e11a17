//! Opening the devbook database.
//!
//! [`Config::build`] connects, creates the file when it is missing and
//! applies the embedded migrations. After that the users, departments,
//! devices, device images and reservations tables all exist. Uniqueness of
//! `users.email` and `devices.serial_number` and the `start_at < end_at`
//! rule on reservations are enforced by the schema, not only by the
//! services.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::error::StorageError;

/// Where the devbook database lives.
#[derive(Debug, Clone)]
pub struct Config {
    /// `SQLite` URL, e.g. `sqlite:devbook.db` or `sqlite::memory:`.
    pub database_url: String,
}

impl Config {
    /// Open the database and bring its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is not a `SQLite` URL, the
    /// connection fails, or a migration fails.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::open(&self.database_url).await
    }
}

/// A migrated devbook database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn open(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!(database_url, "devbook schema is up to date");

        Ok(Self { pool })
    }

    /// Pool shared by every repository of this adapter.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
