//! Image store port — binary storage for device pictures.

use std::future::Future;
use std::sync::Arc;

use devbook_domain::error::DevbookError;
use devbook_domain::id::ImageId;

/// An uploaded picture together with the metadata needed to serve it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceImage {
    /// Original file name, e.g. `front.png`.
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Stores and retrieves [`DeviceImage`]s.
pub trait ImageStore {
    /// Persist `image` and return the id it can be loaded back with.
    fn store(
        &self,
        image: DeviceImage,
    ) -> impl Future<Output = Result<ImageId, DevbookError>> + Send;

    /// Load a previously stored image.
    fn load(
        &self,
        id: ImageId,
    ) -> impl Future<Output = Result<Option<DeviceImage>, DevbookError>> + Send;
}

impl<T: ImageStore + Send + Sync> ImageStore for Arc<T> {
    fn store(
        &self,
        image: DeviceImage,
    ) -> impl Future<Output = Result<ImageId, DevbookError>> + Send {
        (**self).store(image)
    }

    fn load(
        &self,
        id: ImageId,
    ) -> impl Future<Output = Result<Option<DeviceImage>, DevbookError>> + Send {
        (**self).load(id)
    }
}
