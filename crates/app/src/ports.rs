//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod credentials;
pub mod image_store;
pub mod reservation_repo;
pub mod storage;

pub use credentials::CredentialHasher;
pub use image_store::{DeviceImage, ImageStore};
pub use reservation_repo::ReservationRepository;
pub use storage::{DepartmentRepository, DeviceRepository, UserRepository};
