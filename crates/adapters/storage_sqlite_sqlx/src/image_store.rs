//! `SQLite` implementation of [`ImageStore`]; images live as blobs next to the devices.

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use devbook_app::ports::{DeviceImage, ImageStore};
use devbook_domain::error::DevbookError;
use devbook_domain::id::ImageId;

use crate::error::StorageError;

struct Wrapper(DeviceImage);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(DeviceImage {
            file_name: row.try_get("file_name")?,
            content_type: row.try_get("content_type")?,
            bytes: row.try_get("bytes")?,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO device_images (id, file_name, content_type, bytes) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str =
    "SELECT file_name, content_type, bytes FROM device_images WHERE id = ?";

/// `SQLite`-backed image store.
pub struct SqliteImageStore {
    pool: SqlitePool,
}

impl SqliteImageStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ImageStore for SqliteImageStore {
    fn store(
        &self,
        image: DeviceImage,
    ) -> impl Future<Output = Result<ImageId, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let id = ImageId::new();
            sqlx::query(INSERT)
                .bind(id.to_string())
                .bind(image.file_name)
                .bind(image.content_type)
                .bind(image.bytes)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(id)
        }
    }

    fn load(
        &self,
        id: ImageId,
    ) -> impl Future<Output = Result<Option<DeviceImage>, DevbookError>> + Send {
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
}
