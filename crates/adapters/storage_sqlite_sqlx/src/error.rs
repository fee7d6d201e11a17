//! Storage-specific error type wrapping sqlx errors.

use devbook_domain::error::{ConflictError, DevbookError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for DevbookError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// A stored millisecond timestamp that `chrono` cannot represent.
#[derive(Debug, thiserror::Error)]
#[error("stored timestamp {0} is out of range")]
pub(crate) struct TimestampOutOfRange(pub i64);

/// Wrap a column conversion failure the way sqlx reports decode errors.
pub(crate) fn decode_error(err: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

/// Report a `UNIQUE` violation as `conflict`, anything else as a storage error.
pub(crate) fn unique_or_storage(
    err: sqlx::Error,
    conflict: impl FnOnce() -> ConflictError,
) -> DevbookError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            tracing::debug!(error = %db, "unique constraint rejected write");
            conflict().into()
        }
        _ => StorageError::from(err).into(),
    }
}
