//! Storage port — repository traits for users, departments and devices.
//!
//! Unique fields (user email, device serial number) are looked up by the
//! services before writing, but implementations must also reject duplicates
//! themselves (e.g. with a `UNIQUE` constraint) and report them as
//! [`DevbookError::Conflict`], since the lookup and the write are separate
//! calls.

use std::future::Future;
use std::sync::Arc;

use devbook_domain::department::Department;
use devbook_domain::device::Device;
use devbook_domain::error::DevbookError;
use devbook_domain::id::{DepartmentId, DeviceId, UserId};
use devbook_domain::user::User;

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    /// Insert a new user.
    fn create(&self, user: User) -> impl Future<Output = Result<User, DevbookError>> + Send;

    /// Get a user by its unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, DevbookError>> + Send;

    /// Find the user registered with `email`.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, DevbookError>> + Send;

    /// Get all users.
    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, DevbookError>> + Send;

    /// Overwrite an existing user.
    fn update(&self, user: User) -> impl Future<Output = Result<User, DevbookError>> + Send;

    /// Delete a user. Deleting an unknown id is not an error.
    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), DevbookError>> + Send;
}

/// Repository for persisting and querying [`Department`]s.
pub trait DepartmentRepository {
    /// Insert a new department.
    fn create(
        &self,
        department: Department,
    ) -> impl Future<Output = Result<Department, DevbookError>> + Send;

    /// Get a department by its unique identifier.
    fn get_by_id(
        &self,
        id: DepartmentId,
    ) -> impl Future<Output = Result<Option<Department>, DevbookError>> + Send;

    /// Get all departments.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Department>, DevbookError>> + Send;

    /// Overwrite an existing department.
    fn update(
        &self,
        department: Department,
    ) -> impl Future<Output = Result<Department, DevbookError>> + Send;

    /// Delete a department. Deleting an unknown id is not an error.
    fn delete(&self, id: DepartmentId) -> impl Future<Output = Result<(), DevbookError>> + Send;
}

/// Repository for persisting and querying [`Device`]s.
pub trait DeviceRepository {
    /// Insert a new device.
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DevbookError>> + Send;

    /// Get a device by its unique identifier.
    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DevbookError>> + Send;

    /// Find the device carrying `serial_number`.
    fn find_by_serial_number(
        &self,
        serial_number: &str,
    ) -> impl Future<Output = Result<Option<Device>, DevbookError>> + Send;

    /// Get all devices.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DevbookError>> + Send;

    /// Overwrite an existing device.
    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DevbookError>> + Send;

    /// Delete a device. Deleting an unknown id is not an error.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DevbookError>> + Send;
}

impl<T: UserRepository + Send + Sync> UserRepository for Arc<T> {
    fn create(&self, user: User) -> impl Future<Output = Result<User, DevbookError>> + Send {
        (**self).create(user)
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, DevbookError>> + Send {
        (**self).get_by_id(id)
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, DevbookError>> + Send {
        (**self).find_by_email(email)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, DevbookError>> + Send {
        (**self).get_all()
    }

    fn update(&self, user: User) -> impl Future<Output = Result<User, DevbookError>> + Send {
        (**self).update(user)
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), DevbookError>> + Send {
        (**self).delete(id)
    }
}

impl<T: DepartmentRepository + Send + Sync> DepartmentRepository for Arc<T> {
    fn create(
        &self,
        department: Department,
    ) -> impl Future<Output = Result<Department, DevbookError>> + Send {
        (**self).create(department)
    }

    fn get_by_id(
        &self,
        id: DepartmentId,
    ) -> impl Future<Output = Result<Option<Department>, DevbookError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Department>, DevbookError>> + Send {
        (**self).get_all()
    }

    fn update(
        &self,
        department: Department,
    ) -> impl Future<Output = Result<Department, DevbookError>> + Send {
        (**self).update(department)
    }

    fn delete(&self, id: DepartmentId) -> impl Future<Output = Result<(), DevbookError>> + Send {
        (**self).delete(id)
    }
}

impl<T: DeviceRepository + Send + Sync> DeviceRepository for Arc<T> {
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DevbookError>> + Send {
        (**self).create(device)
    }

    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DevbookError>> + Send {
        (**self).get_by_id(id)
    }

    fn find_by_serial_number(
        &self,
        serial_number: &str,
    ) -> impl Future<Output = Result<Option<Device>, DevbookError>> + Send {
        (**self).find_by_serial_number(serial_number)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DevbookError>> + Send {
        (**self).get_all()
    }

    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DevbookError>> + Send {
        (**self).update(device)
    }

    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DevbookError>> + Send {
        (**self).delete(id)
    }
}
