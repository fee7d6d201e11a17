//! Device service — use-cases for managing devices.

use devbook_domain::device::Device;
use devbook_domain::error::{ConflictError, DevbookError};
use devbook_domain::id::{DepartmentId, DeviceId};

use crate::dto::{DeviceDto, DeviceInput};
use crate::ports::{DepartmentRepository, DeviceImage, DeviceRepository, ImageStore};

/// Application service for device CRUD operations.
///
/// Every device belongs to an existing department and carries a serial
/// number no other device uses.
pub struct DeviceService<R, D, I> {
    repo: R,
    departments: D,
    images: I,
}

impl<R, D, I> DeviceService<R, D, I>
where
    R: DeviceRepository,
    D: DepartmentRepository,
    I: ImageStore,
{
    /// Create a new service backed by the given repositories and image store.
    pub fn new(repo: R, departments: D, images: I) -> Self {
        Self {
            repo,
            departments,
            images,
        }
    }

    async fn ensure_department(&self, id: DepartmentId) -> Result<(), DevbookError> {
        if self.departments.get_by_id(id).await?.is_none() {
            tracing::debug!(department_id = %id, "department does not exist");
            return Err(DevbookError::not_found("Department", id));
        }
        Ok(())
    }

    async fn ensure_serial_free(
        &self,
        serial_number: &str,
        owner: Option<DeviceId>,
    ) -> Result<(), DevbookError> {
        match self.repo.find_by_serial_number(serial_number).await? {
            Some(existing) if Some(existing.id) != owner => {
                tracing::debug!(serial_number, "serial number already in use");
                Err(ConflictError::SerialNumberTaken(serial_number.to_string()).into())
            }
            _ => Ok(()),
        }
    }

    /// Register a new device, optionally with a picture.
    ///
    /// The department, serial number and field invariants are all checked
    /// before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::NotFound`] when the department does not exist,
    /// [`DevbookError::Conflict`] when the serial number is taken,
    /// [`DevbookError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(
        skip(self, input, image),
        fields(serial_number = %input.serial_number, with_image = image.is_some())
    )]
    pub async fn create_device(
        &self,
        input: DeviceInput,
        image: Option<DeviceImage>,
    ) -> Result<DeviceDto, DevbookError> {
        self.ensure_department(input.department_id).await?;
        let mut device = Device::builder()
            .name(input.name)
            .serial_number(input.serial_number)
            .department_id(input.department_id)
            .build()?;
        self.ensure_serial_free(&device.serial_number, None).await?;

        if let Some(image) = image {
            device.image_id = Some(self.images.store(image).await?);
        }

        let created = self.repo.create(device).await?;
        tracing::info!(device_id = %created.id, "device created");
        Ok(created.into())
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<DeviceDto, DevbookError> {
        self.find(id).await.map(DeviceDto::from)
    }

    async fn find(&self, id: DeviceId) -> Result<Device, DevbookError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| DevbookError::not_found("Device", id))
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<DeviceDto>, DevbookError> {
        let devices = self.repo.get_all().await?;
        Ok(devices.into_iter().map(DeviceDto::from).collect())
    }

    /// Update name, serial number and department of an existing device.
    ///
    /// The stored picture is kept.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::NotFound`] when the device or the department
    /// does not exist, [`DevbookError::Conflict`] when another device has
    /// the serial number, [`DevbookError::Validation`] if invariants fail,
    /// or a storage error.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_device(
        &self,
        id: DeviceId,
        input: DeviceInput,
    ) -> Result<DeviceDto, DevbookError> {
        let mut device = self.find(id).await?;
        self.ensure_department(input.department_id).await?;
        self.ensure_serial_free(&input.serial_number, Some(id)).await?;

        device.name = input.name;
        device.serial_number = input.serial_number;
        device.department_id = input.department_id;
        device.validate()?;

        self.repo.update(device).await.map(DeviceDto::from)
    }

    /// Fetch the picture attached to a device.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::NotFound`] when the device does not exist or
    /// has no picture, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn get_device_image(&self, id: DeviceId) -> Result<DeviceImage, DevbookError> {
        let device = self.find(id).await?;
        let image_id = device
            .image_id
            .ok_or_else(|| DevbookError::not_found("Image", format!("of device {id}")))?;
        self.images
            .load(image_id)
            .await?
            .ok_or_else(|| DevbookError::not_found("Image", image_id))
    }

    /// Delete a device by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), DevbookError> {
        self.repo.delete(id).await
    }
}
