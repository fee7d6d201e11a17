//! Transfer types — the flat shapes that cross the service boundary.
//!
//! Services accept the `*Input` / `New*` types and return the `*Dto` types.
//! Conversions from domain entities are explicit `From` impls so the
//! persisted shape and the transfer shape can evolve separately (e.g.
//! [`UserDto`] never carries the password hash).

use std::fmt;

use serde::{Deserialize, Serialize};

use devbook_domain::department::Department;
use devbook_domain::device::Device;
use devbook_domain::id::{DepartmentId, DeviceId, ImageId, ReservationId, UserId};
use devbook_domain::reservation::{Reservation, ReservationStatus};
use devbook_domain::time::Timestamp;
use devbook_domain::user::User;

/// Public view of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

/// Registration payload.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Plaintext; hashed before it reaches any repository.
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Profile update payload. The password is only changed when present.
#[derive(Clone, Deserialize)]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
}

impl fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserUpdate")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Public view of a [`Department`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentDto {
    pub id: DepartmentId,
    pub name: String,
}

impl From<Department> for DepartmentDto {
    fn from(department: Department) -> Self {
        Self {
            id: department.id,
            name: department.name,
        }
    }
}

/// Create/update payload for a department.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentInput {
    pub name: String,
}

/// Public view of a [`Device`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDto {
    pub id: DeviceId,
    pub name: String,
    pub serial_number: String,
    pub department_id: DepartmentId,
    pub image_id: Option<ImageId>,
}

impl From<Device> for DeviceDto {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            name: device.name,
            serial_number: device.serial_number,
            department_id: device.department_id,
            image_id: device.image_id,
        }
    }
}

/// Create/update payload for a device.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceInput {
    pub name: String,
    pub serial_number: String,
    pub department_id: DepartmentId,
}

/// Public view of a [`Reservation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDto {
    pub id: ReservationId,
    pub user_id: UserId,
    pub device_id: DeviceId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: ReservationStatus,
}

impl From<Reservation> for ReservationDto {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            user_id: reservation.user_id,
            device_id: reservation.device_id,
            start_date: reservation.window.start(),
            end_date: reservation.window.end(),
            status: reservation.status,
        }
    }
}

/// Create/update payload for a reservation.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationInput {
    pub user_id: UserId,
    pub device_id: DeviceId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use devbook_domain::reservation::TimeWindow;

    #[test]
    fn should_drop_password_hash_when_mapping_user() {
        let user = User::builder()
            .first_name("Ali")
            .last_name("Test")
            .email("ali@test.com")
            .password_hash("hashed")
            .build()
            .unwrap();
        let id = user.id;

        let dto = UserDto::from(user);
        assert_eq!(dto.id, id);
        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("hashed"));
    }

    #[test]
    fn should_flatten_window_when_mapping_reservation() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
        let end = start + Duration::hours(2);
        let reservation = Reservation::new(
            UserId::new(),
            DeviceId::new(),
            TimeWindow::new(start, end).unwrap(),
        );

        let dto = ReservationDto::from(reservation.clone());
        assert_eq!(dto.id, reservation.id);
        assert_eq!(dto.start_date, start);
        assert_eq!(dto.end_date, end);
        assert_eq!(dto.status, ReservationStatus::Wait);
    }

    #[test]
    fn should_redact_password_in_debug_output() {
        let input = NewUser {
            first_name: "Ali".to_string(),
            last_name: "Test".to_string(),
            email: "ali@test.com".to_string(),
            password: "1234".to_string(),
        };
        let rendered = format!("{input:?}");
        assert!(!rendered.contains("1234"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn should_default_missing_password_to_none_when_deserializing_update() {
        let update: UserUpdate = serde_json::from_str(
            r#"{"first_name":"New","last_name":"Name","email":"new@test.com"}"#,
        )
        .unwrap();
        assert!(update.password.is_none());
    }
}
