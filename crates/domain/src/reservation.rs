//! Reservation — a user's booking of a device over a time window.
//!
//! A reservation is created in [`ReservationStatus::Wait`] and confirmed by
//! [`Reservation::confirm`]. For a given `(user, device)` pair no two
//! reservations may have overlapping windows; enforcing that across stored
//! records is the job of the reservation repository, the single-record check
//! lives in [`Reservation::conflicts_with`].

mod status;
mod window;

pub use status::{ReservationStatus, UnknownStatus};
pub use window::TimeWindow;

use crate::id::{DeviceId, ReservationId, UserId};

/// A booking of one device by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: UserId,
    pub device_id: DeviceId,
    pub window: TimeWindow,
    pub status: ReservationStatus,
}

impl Reservation {
    /// Create a new, unconfirmed reservation with a fresh id.
    #[must_use]
    pub fn new(user_id: UserId, device_id: DeviceId, window: TimeWindow) -> Self {
        Self {
            id: ReservationId::new(),
            user_id,
            device_id,
            window,
            status: ReservationStatus::Wait,
        }
    }

    /// Mark the reservation as confirmed. Confirming twice is a no-op.
    pub fn confirm(&mut self) {
        self.status = ReservationStatus::Reserved;
    }

    /// Whether `other` is a different booking of the same pair whose window
    /// overlaps this one.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.id != other.id
            && self.user_id == other.user_id
            && self.device_id == other.device_id
            && self.window.overlaps(&other.window)
    }
}
