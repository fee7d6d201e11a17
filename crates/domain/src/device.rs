//! Device — a bookable piece of equipment owned by a department.

use serde::{Deserialize, Serialize};

use crate::error::{DevbookError, ValidationError};
use crate::id::{DepartmentId, DeviceId, ImageId};

/// A bookable piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    /// Manufacturer serial number, unique across all devices.
    pub serial_number: String,
    pub department_id: DepartmentId,
    /// Picture of the device, kept in the image store.
    pub image_id: Option<ImageId>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::Validation`] when `name` or `serial_number` is blank.
    pub fn validate(&self) -> Result<(), DevbookError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.serial_number.trim().is_empty() {
            return Err(ValidationError::EmptySerialNumber.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    serial_number: Option<String>,
    department_id: Option<DepartmentId>,
    image_id: Option<ImageId>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = Some(serial_number.into());
        self
    }

    #[must_use]
    pub fn department_id(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    #[must_use]
    pub fn image_id(mut self, image_id: ImageId) -> Self {
        self.image_id = Some(image_id);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// A missing department id yields a fresh one, which will then fail the
    /// department lookup in the service layer.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::Validation`] if `name` or `serial_number` is
    /// missing or blank.
    pub fn build(self) -> Result<Device, DevbookError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            serial_number: self.serial_number.unwrap_or_default(),
            department_id: self.department_id.unwrap_or_default(),
            image_id: self.image_id,
        };
        device.validate()?;
        Ok(device)
    }
}
