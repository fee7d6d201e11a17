//! `SQLite` implementation of [`ReservationRepository`].
//!
//! Windows are stored as integer milliseconds so the overlap predicate
//! `start_at < :end AND :start < end_at` compares numerically. The
//! `*_IF_FREE` statements embed that predicate in a `NOT EXISTS` guard, which
//! makes check and write a single statement under `SQLite`'s write lock.

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use devbook_app::ports::ReservationRepository;
use devbook_domain::error::{ConflictError, DevbookError};
use devbook_domain::id::{DeviceId, ReservationId, UserId};
use devbook_domain::reservation::{Reservation, ReservationStatus, TimeWindow};
use devbook_domain::time::{Timestamp, from_millis};

use crate::error::{StorageError, TimestampOutOfRange, decode_error};

/// Wrapper for converting database rows into domain [`Reservation`].
struct Wrapper(Reservation);

fn timestamp(millis: i64) -> Result<Timestamp, sqlx::Error> {
    from_millis(millis).ok_or_else(|| decode_error(TimestampOutOfRange(millis)))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let device_id: String = row.try_get("device_id")?;
        let start_at: i64 = row.try_get("start_at")?;
        let end_at: i64 = row.try_get("end_at")?;
        let status: String = row.try_get("status")?;

        let window =
            TimeWindow::new(timestamp(start_at)?, timestamp(end_at)?).map_err(decode_error)?;

        Ok(Self(Reservation {
            id: ReservationId::from_str(&id).map_err(decode_error)?,
            user_id: UserId::from_str(&user_id).map_err(decode_error)?,
            device_id: DeviceId::from_str(&device_id).map_err(decode_error)?,
            window,
            status: ReservationStatus::from_str(&status).map_err(decode_error)?,
        }))
    }
}

const SELECT_BY_ID: &str = "SELECT * FROM reservations WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM reservations ORDER BY start_at";
const EXISTS_OVERLAPPING: &str = "SELECT EXISTS (
    SELECT 1 FROM reservations
    WHERE user_id = ?1 AND device_id = ?2 AND start_at < ?4 AND ?3 < end_at
      AND (?5 IS NULL OR id <> ?5)
)";
const INSERT_IF_FREE: &str = "INSERT INTO reservations (id, user_id, device_id, start_at, end_at, status)
SELECT ?1, ?2, ?3, ?4, ?5, ?6
WHERE NOT EXISTS (
    SELECT 1 FROM reservations
    WHERE user_id = ?2 AND device_id = ?3 AND start_at < ?5 AND ?4 < end_at
)";
const UPDATE_IF_FREE: &str = "UPDATE reservations
SET user_id = ?2, device_id = ?3, start_at = ?4, end_at = ?5, status = ?6
WHERE id = ?1 AND NOT EXISTS (
    SELECT 1 FROM reservations
    WHERE id <> ?1 AND user_id = ?2 AND device_id = ?3 AND start_at < ?5 AND ?4 < end_at
)";
const UPDATE: &str = "UPDATE reservations
SET user_id = ?2, device_id = ?3, start_at = ?4, end_at = ?5, status = ?6
WHERE id = ?1";
const DELETE_BY_ID: &str = "DELETE FROM reservations WHERE id = ?";

/// Bind the six columns of `reservation` as `?1` through `?6`.
fn bind_all<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    reservation: &Reservation,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    query
        .bind(reservation.id.to_string())
        .bind(reservation.user_id.to_string())
        .bind(reservation.device_id.to_string())
        .bind(reservation.window.start().timestamp_millis())
        .bind(reservation.window.end().timestamp_millis())
        .bind(reservation.status.as_str())
}

fn overlap_conflict(reservation: &Reservation) -> DevbookError {
    ConflictError::OverlappingReservation {
        user_id: reservation.user_id.to_string(),
        device_id: reservation.device_id.to_string(),
    }
    .into()
}

/// `SQLite`-backed reservation repository.
pub struct SqliteReservationRepository {
    pool: SqlitePool,
}

impl SqliteReservationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ReservationRepository for SqliteReservationRepository {
    fn get_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, DevbookError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Reservation>, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn exists_overlapping(
        &self,
        user_id: UserId,
        device_id: DeviceId,
        window: TimeWindow,
        exclude: Option<ReservationId>,
    ) -> impl Future<Output = Result<bool, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let exists: bool = sqlx::query_scalar(EXISTS_OVERLAPPING)
                .bind(user_id.to_string())
                .bind(device_id.to_string())
                .bind(window.start().timestamp_millis())
                .bind(window.end().timestamp_millis())
                .bind(exclude.map(|id| id.to_string()))
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(exists)
        }
    }

    fn create_if_free(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = bind_all(sqlx::query(INSERT_IF_FREE), &reservation)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                tracing::debug!(reservation_id = %reservation.id, "insert skipped by overlap guard");
                return Err(overlap_conflict(&reservation));
            }
            Ok(reservation)
        }
    }

    fn update_if_free(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = bind_all(sqlx::query(UPDATE_IF_FREE), &reservation)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() > 0 {
                return Ok(reservation);
            }

            let still_there: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(reservation.id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;
            if still_there.is_none() {
                return Err(DevbookError::not_found("Reservation", reservation.id));
            }
            tracing::debug!(reservation_id = %reservation.id, "update skipped by overlap guard");
            Err(overlap_conflict(&reservation))
        }
    }

    fn update(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = bind_all(sqlx::query(UPDATE), &reservation)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(DevbookError::not_found("Reservation", reservation.id));
            }
            Ok(reservation)
        }
    }

    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<(), DevbookError>> + Send {
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
