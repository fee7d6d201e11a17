//! `SQLite` implementation of [`DeviceRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use devbook_app::ports::DeviceRepository;
use devbook_domain::device::Device;
use devbook_domain::error::{ConflictError, DevbookError};
use devbook_domain::id::{DepartmentId, DeviceId, ImageId};

use crate::error::{StorageError, decode_error, unique_or_storage};

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let serial_number: String = row.try_get("serial_number")?;
        let department_id: String = row.try_get("department_id")?;
        let image_id: Option<String> = row.try_get("image_id")?;

        let id = DeviceId::from_str(&id).map_err(decode_error)?;
        let department_id = DepartmentId::from_str(&department_id).map_err(decode_error)?;
        let image_id = image_id
            .map(|s| ImageId::from_str(&s))
            .transpose()
            .map_err(decode_error)?;

        Ok(Self(Device {
            id,
            name,
            serial_number,
            department_id,
            image_id,
        }))
    }
}

const INSERT: &str = "INSERT INTO devices (id, name, serial_number, department_id, image_id) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_BY_SERIAL: &str = "SELECT * FROM devices WHERE serial_number = ?";
const SELECT_ALL: &str = "SELECT * FROM devices ORDER BY name";
const UPDATE: &str = "UPDATE devices SET name = ?, serial_number = ?, department_id = ?, image_id = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(device.id.to_string())
                .bind(&device.name)
                .bind(&device.serial_number)
                .bind(device.department_id.to_string())
                .bind(device.image_id.map(|id| id.to_string()))
                .execute(&pool)
                .await
                .map_err(|err| {
                    unique_or_storage(err, || {
                        ConflictError::SerialNumberTaken(device.serial_number.clone())
                    })
                })?;

            Ok(device)
        }
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_by_serial_number(
        &self,
        serial_number: &str,
    ) -> impl Future<Output = Result<Option<Device>, DevbookError>> + Send {
        let pool = self.pool.clone();
        let serial_number = serial_number.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_SERIAL)
                .bind(serial_number)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&device.name)
                .bind(&device.serial_number)
                .bind(device.department_id.to_string())
                .bind(device.image_id.map(|id| id.to_string()))
                .bind(device.id.to_string())
                .execute(&pool)
                .await
                .map_err(|err| {
                    unique_or_storage(err, || {
                        ConflictError::SerialNumberTaken(device.serial_number.clone())
                    })
                })?;

            Ok(device)
        }
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DevbookError>> + Send {
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
