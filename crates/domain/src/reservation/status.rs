//! Reservation status — where a booking is in its approval lifecycle.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a reservation.
///
/// New bookings start as [`Wait`](Self::Wait) and move to
/// [`Reserved`](Self::Reserved) once confirmed. There is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    Wait,
    Reserved,
}

impl ReservationStatus {
    /// Stable lowercase name, as stored and serialised.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wait => "wait",
            Self::Reserved => "reserved",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown status name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reservation status {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wait" => Ok(Self::Wait),
            "reserved" => Ok(Self::Reserved),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_wait() {
        assert_eq!(ReservationStatus::default(), ReservationStatus::Wait);
    }

    #[test]
    fn should_display_lowercase_variant_name() {
        assert_eq!(ReservationStatus::Wait.to_string(), "wait");
        assert_eq!(ReservationStatus::Reserved.to_string(), "reserved");
    }

    #[test]
    fn should_parse_stored_names() {
        assert_eq!(
            "reserved".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Reserved
        );
        assert_eq!(
            "wait".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Wait
        );
    }

    #[test]
    fn should_reject_unknown_name() {
        let err = "cancelled".parse::<ReservationStatus>().unwrap_err();
        assert_eq!(err, UnknownStatus("cancelled".to_string()));
    }

    #[test]
    fn should_serialize_as_lowercase_string() {
        let json = serde_json::to_string(&ReservationStatus::Reserved).unwrap();
        assert_eq!(json, "\"reserved\"");
    }
}
