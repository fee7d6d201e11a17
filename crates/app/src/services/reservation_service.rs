//! Reservation service — booking devices and confirming bookings.
//!
//! A booking references an existing user and device and may not overlap
//! another booking of the same `(user, device)` pair. The overlap check and
//! the write are delegated together to
//! [`ReservationRepository::create_if_free`] /
//! [`ReservationRepository::update_if_free`] so the store can perform them
//! atomically.

use devbook_domain::error::DevbookError;
use devbook_domain::id::{DeviceId, ReservationId, UserId};
use devbook_domain::reservation::{Reservation, TimeWindow};
use devbook_domain::time::Timestamp;

use crate::dto::{ReservationDto, ReservationInput};
use crate::ports::{DeviceRepository, ReservationRepository, UserRepository};

/// Application service for reservation use-cases.
pub struct ReservationService<R, U, D> {
    repo: R,
    users: U,
    devices: D,
}

impl<R, U, D> ReservationService<R, U, D>
where
    R: ReservationRepository,
    U: UserRepository,
    D: DeviceRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(repo: R, users: U, devices: D) -> Self {
        Self {
            repo,
            users,
            devices,
        }
    }

    async fn ensure_references(
        &self,
        user_id: UserId,
        device_id: DeviceId,
    ) -> Result<(), DevbookError> {
        if self.users.get_by_id(user_id).await?.is_none() {
            tracing::debug!(%user_id, "user does not exist");
            return Err(DevbookError::not_found("User", user_id));
        }
        if self.devices.get_by_id(device_id).await?.is_none() {
            tracing::debug!(%device_id, "device does not exist");
            return Err(DevbookError::not_found("Device", device_id));
        }
        Ok(())
    }

    async fn find(&self, id: ReservationId) -> Result<Reservation, DevbookError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| DevbookError::not_found("Reservation", id))
    }

    /// List all reservations.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_reservations(&self) -> Result<Vec<ReservationDto>, DevbookError> {
        let reservations = self.repo.get_all().await?;
        Ok(reservations.into_iter().map(ReservationDto::from).collect())
    }

    /// Look up a reservation by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::NotFound`] when no reservation with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_reservation(&self, id: ReservationId) -> Result<ReservationDto, DevbookError> {
        self.find(id).await.map(ReservationDto::from)
    }

    /// Book a device. The new reservation is in `wait` status.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::Validation`] when the window is empty or
    /// inverted, [`DevbookError::NotFound`] when the user or device does not
    /// exist, [`DevbookError::Conflict`] when the pair already has an
    /// overlapping booking, or a storage error.
    #[tracing::instrument(
        skip(self, input),
        fields(user_id = %input.user_id, device_id = %input.device_id)
    )]
    pub async fn create_reservation(
        &self,
        input: ReservationInput,
    ) -> Result<ReservationDto, DevbookError> {
        let window = TimeWindow::new(input.start_date, input.end_date)?;
        self.ensure_references(input.user_id, input.device_id).await?;

        let reservation = Reservation::new(input.user_id, input.device_id, window);
        let created = self
            .repo
            .create_if_free(reservation)
            .await
            .inspect_err(|err| {
                if matches!(err, DevbookError::Conflict(_)) {
                    tracing::info!("requested window overlaps an existing reservation");
                }
            })?;
        tracing::info!(reservation_id = %created.id, "reservation created");
        Ok(created.into())
    }

    /// Confirm a reservation, moving it to `reserved`.
    ///
    /// Confirming an already reserved booking succeeds and leaves it
    /// `reserved`.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::NotFound`] when no reservation with `id`
    /// exists, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, id: ReservationId) -> Result<ReservationDto, DevbookError> {
        let mut reservation = self.find(id).await?;
        reservation.confirm();
        self.repo.update(reservation).await.map(ReservationDto::from)
    }

    /// Move a reservation to another user, device or window.
    ///
    /// The overlap check ignores the reservation itself, so shifting a
    /// booking within its own previous window is allowed. The status is
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::NotFound`] when the reservation, user or
    /// device does not exist, [`DevbookError::Validation`] for a bad window,
    /// [`DevbookError::Conflict`] on overlap, or a storage error.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_reservation(
        &self,
        id: ReservationId,
        input: ReservationInput,
    ) -> Result<ReservationDto, DevbookError> {
        let mut reservation = self.find(id).await?;
        self.ensure_references(input.user_id, input.device_id).await?;
        let window = TimeWindow::new(input.start_date, input.end_date)?;

        reservation.user_id = input.user_id;
        reservation.device_id = input.device_id;
        reservation.window = window;

        self.repo
            .update_if_free(reservation)
            .await
            .map(ReservationDto::from)
    }

    /// Whether `[start, end)` is free for the `(user, device)` pair.
    ///
    /// This is an advisory read; [`create_reservation`](Self::create_reservation)
    /// re-checks atomically.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::Validation`] for a bad window, or a storage
    /// error.
    pub async fn is_available(
        &self,
        user_id: UserId,
        device_id: DeviceId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<bool, DevbookError> {
        let window = TimeWindow::new(start, end)?;
        let taken = self
            .repo
            .exists_overlapping(user_id, device_id, window, None)
            .await?;
        Ok(!taken)
    }

    /// Delete a reservation by id. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_reservation(&self, id: ReservationId) -> Result<(), DevbookError> {
        self.repo.delete(id).await
    }
}
