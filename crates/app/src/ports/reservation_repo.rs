//! Reservation repository port — persistence for reservations.
//!
//! The no-overlap rule spans several records, so checking it and writing the
//! reservation must happen as one atomic step inside the store:
//! [`create_if_free`](ReservationRepository::create_if_free) and
//! [`update_if_free`](ReservationRepository::update_if_free) either write or
//! fail with [`ConflictError::OverlappingReservation`].
//!
//! [`ConflictError::OverlappingReservation`]: devbook_domain::error::ConflictError::OverlappingReservation

use std::future::Future;
use std::sync::Arc;

use devbook_domain::error::DevbookError;
use devbook_domain::id::{DeviceId, ReservationId, UserId};
use devbook_domain::reservation::{Reservation, TimeWindow};

/// Repository for persisting and querying [`Reservation`]s.
pub trait ReservationRepository {
    /// Get a reservation by its unique identifier.
    fn get_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, DevbookError>> + Send;

    /// Get all reservations.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Reservation>, DevbookError>> + Send;

    /// Whether a reservation for `(user_id, device_id)` other than `exclude`
    /// has a window overlapping `window`.
    fn exists_overlapping(
        &self,
        user_id: UserId,
        device_id: DeviceId,
        window: TimeWindow,
        exclude: Option<ReservationId>,
    ) -> impl Future<Output = Result<bool, DevbookError>> + Send;

    /// Insert `reservation` unless another reservation of the same pair
    /// overlaps its window.
    fn create_if_free(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, DevbookError>> + Send;

    /// Overwrite `reservation` unless another reservation of the same pair
    /// overlaps its new window. Returns `NotFound` if the record is gone.
    fn update_if_free(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, DevbookError>> + Send;

    /// Overwrite `reservation` without re-checking overlap (status changes).
    /// Returns `NotFound` if the record is gone.
    fn update(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, DevbookError>> + Send;

    /// Delete a reservation. Deleting an unknown id is not an error.
    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<(), DevbookError>> + Send;
}

impl<T: ReservationRepository + Send + Sync> ReservationRepository for Arc<T> {
    fn get_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, DevbookError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Reservation>, DevbookError>> + Send {
        (**self).get_all()
    }

    fn exists_overlapping(
        &self,
        user_id: UserId,
        device_id: DeviceId,
        window: TimeWindow,
        exclude: Option<ReservationId>,
    ) -> impl Future<Output = Result<bool, DevbookError>> + Send {
        (**self).exists_overlapping(user_id, device_id, window, exclude)
    }

    fn create_if_free(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, DevbookError>> + Send {
        (**self).create_if_free(reservation)
    }

    fn update_if_free(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, DevbookError>> + Send {
        (**self).update_if_free(reservation)
    }

    fn update(
        &self,
        reservation: Reservation,
    ) -> impl Future<Output = Result<Reservation, DevbookError>> + Send {
        (**self).update(reservation)
    }

    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<(), DevbookError>> + Send {
        (**self).delete(id)
    }
}
