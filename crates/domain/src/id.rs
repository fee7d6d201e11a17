//! Identifiers for users, departments, devices, reservations and images.
//!
//! Every id is a random v4 UUID. Each record kind has its own newtype so a
//! `DeviceId` cannot be passed where a reservation expects a `UserId`.
//!
//! The text form is the hyphenated lowercase UUID. Storage adapters persist
//! that form and read it back through [`FromStr`]; serde emits it as a bare
//! JSON string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl $name {
            /// Generate a fresh identifier for a new record.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.as_hyphenated().fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Identifies a [`User`](crate::user::User).
    UserId
);

define_id!(
    /// Identifies a [`Department`](crate::department::Department).
    DepartmentId
);

define_id!(
    /// Identifies a [`Device`](crate::device::Device).
    DeviceId
);

define_id!(
    /// Identifies a [`Reservation`](crate::reservation::Reservation).
    ReservationId
);

define_id!(
    /// Key of a stored device picture, referenced by
    /// [`Device::image_id`](crate::device::Device::image_id).
    ImageId
);

#[cfg(test)]
mod tests {
    use super::*;

    const STORED: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    #[test]
    fn should_give_each_new_reservation_its_own_id() {
        assert_ne!(ReservationId::new(), ReservationId::new());
    }

    #[test]
    fn should_read_reservation_id_back_from_its_stored_text() {
        let id: ReservationId = STORED.parse().unwrap();
        assert_eq!(id.to_string(), STORED);
    }

    #[test]
    fn should_write_device_id_as_hyphenated_lowercase() {
        let id: DeviceId = STORED.to_uppercase().parse().unwrap();
        assert_eq!(id.to_string(), STORED);
    }

    #[test]
    fn should_serialize_user_id_as_bare_string() {
        let id: UserId = STORED.parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{STORED}\""));
        let back: UserId = serde_json::from_str(&format!("\"{STORED}\"")).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn should_reject_department_id_that_is_not_a_uuid() {
        assert!("IT-department".parse::<DepartmentId>().is_err());
        assert!("".parse::<DepartmentId>().is_err());
    }

    #[test]
    fn should_parse_same_text_into_each_id_kind() {
        let device: DeviceId = STORED.parse().unwrap();
        let image: ImageId = STORED.parse().unwrap();
        assert_eq!(device.to_string(), image.to_string());
    }
}
