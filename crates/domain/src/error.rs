//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`DevbookError`] via `#[from]` (domain errors) or a dedicated `From` impl
//! (adapter errors, boxed into [`DevbookError::Storage`] or
//! [`DevbookError::Credential`]).

use std::error::Error as StdError;

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum DevbookError {
    /// Input violates a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("record not found")]
    NotFound(#[from] NotFoundError),

    /// A uniqueness or overlap rule would be broken.
    #[error("conflict")]
    Conflict(#[from] ConflictError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn StdError + Send + Sync>),

    /// The credential hasher failed.
    #[error("credential error")]
    Credential(#[source] Box<dyn StdError + Send + Sync>),
}

/// Malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("serial number must not be empty")]
    EmptySerialNumber,

    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    #[error("password must be at least {min_length} characters long")]
    PasswordTooShort { min_length: usize },

    #[error("reservation must end after it starts")]
    InvalidTimeWindow,
}

/// A lookup by id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (`"User"`, `"Device"`, …).
    pub entity: &'static str,
    /// The identifier that was not found.
    pub id: String,
}

/// A write was refused because it would break a uniqueness or overlap rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error("email {0:?} is already registered")]
    EmailTaken(String),

    #[error("serial number {0:?} is already in use")]
    SerialNumberTaken(String),

    #[error("device {device_id} is already booked by user {user_id} during this window")]
    OverlappingReservation { user_id: String, device_id: String },
}

impl DevbookError {
    /// Shorthand for a [`NotFoundError`] wrapped in [`DevbookError`].
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        NotFoundError {
            entity,
            id: id.to_string(),
        }
        .into()
    }
}
