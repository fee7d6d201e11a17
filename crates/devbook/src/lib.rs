//! # devbook
//!
//! Composition root that wires the adapters into the application services.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the tracing subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

pub mod config;
pub mod telemetry;

use std::sync::Arc;

use devbook_adapter_credentials_argon2::Argon2Hasher;
use devbook_adapter_storage_sqlite_sqlx::{
    Database, SqliteDepartmentRepository, SqliteDeviceRepository, SqliteImageStore,
    SqliteReservationRepository, SqliteUserRepository, StorageError,
};
use devbook_app::services::department_service::DepartmentService;
use devbook_app::services::device_service::DeviceService;
use devbook_app::services::reservation_service::ReservationService;
use devbook_app::services::user_service::UserService;

use crate::config::{AccountsConfig, Config, ConfigError};

pub type Users = UserService<Arc<SqliteUserRepository>, Argon2Hasher>;
pub type Departments = DepartmentService<Arc<SqliteDepartmentRepository>>;
pub type Devices = DeviceService<
    Arc<SqliteDeviceRepository>,
    Arc<SqliteDepartmentRepository>,
    SqliteImageStore,
>;
pub type Reservations = ReservationService<
    SqliteReservationRepository,
    Arc<SqliteUserRepository>,
    Arc<SqliteDeviceRepository>,
>;

/// Errors raised while bringing the application up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open database")]
    Storage(#[from] StorageError),
}

/// The wired application: one shared handle per service.
///
/// Cloning is cheap, only the `Arc`s are cloned.
#[derive(Clone)]
pub struct Devbook {
    pub users: Arc<Users>,
    pub departments: Arc<Departments>,
    pub devices: Arc<Devices>,
    pub reservations: Arc<Reservations>,
}

impl Devbook {
    /// Open the configured database and wire every service on top of it.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError::Storage`] if the connection or migrations fail.
    pub async fn connect(config: &Config) -> Result<Self, StartupError> {
        let db = devbook_adapter_storage_sqlite_sqlx::Config {
            database_url: config.database_url().to_string(),
        }
        .build()
        .await?;
        tracing::info!("database ready");

        Ok(Self::from_database(&db, &config.accounts))
    }

    /// Wire every service on top of an already initialised database.
    #[must_use]
    pub fn from_database(db: &Database, accounts: &AccountsConfig) -> Self {
        let pool = db.pool().clone();

        // Repositories
        let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
        let department_repo = Arc::new(SqliteDepartmentRepository::new(pool.clone()));
        let device_repo = Arc::new(SqliteDeviceRepository::new(pool.clone()));
        let reservation_repo = SqliteReservationRepository::new(pool.clone());
        let image_store = SqliteImageStore::new(pool);

        // Services
        let users = UserService::new(Arc::clone(&user_repo), Argon2Hasher::new())
            .with_min_password_length(accounts.min_password_length);
        let departments = DepartmentService::new(Arc::clone(&department_repo));
        let devices = DeviceService::new(Arc::clone(&device_repo), department_repo, image_store);
        let reservations = ReservationService::new(reservation_repo, user_repo, device_repo);

        Self {
            users: Arc::new(users),
            departments: Arc::new(departments),
            devices: Arc::new(devices),
            reservations: Arc::new(reservations),
        }
    }
}

/// Load `devbook.toml` and the environment, install logging, connect.
///
/// # Errors
///
/// Returns [`StartupError`] when the configuration is invalid or the
/// database cannot be opened.
pub async fn start() -> Result<Devbook, StartupError> {
    let config = Config::load()?;
    telemetry::init(&config.logging);
    tracing::info!(database_url = config.database_url(), "starting devbook");
    Devbook::connect(&config).await
}
