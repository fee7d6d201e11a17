//! # devbook-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `devbook-app::ports`
//! - Store device images as blobs behind the `ImageStore` port
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `devbook-app` (for port traits) and `devbook-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod department_repo;
mod device_repo;
mod error;
mod image_store;
mod pool;
mod reservation_repo;
mod user_repo;

pub use department_repo::SqliteDepartmentRepository;
pub use device_repo::SqliteDeviceRepository;
pub use error::StorageError;
pub use image_store::SqliteImageStore;
pub use pool::{Config, Database};
pub use reservation_repo::SqliteReservationRepository;
pub use user_repo::SqliteUserRepository;
