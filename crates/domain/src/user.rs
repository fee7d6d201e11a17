//! User — a person who can book devices.

use crate::error::{DevbookError, ValidationError};
use crate::id::UserId;

/// A registered user.
///
/// Only the hash of the password is ever held here; the plaintext never
/// leaves the user service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all users.
    pub email: String,
    pub password_hash: String,
}

impl User {
    /// Create a builder for constructing a [`User`].
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::Validation`] when a name is blank or the email
    /// is not of the form `local@domain`.
    pub fn validate(&self) -> Result<(), DevbookError> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        validate_email(&self.email)?;
        Ok(())
    }
}

/// Check that `email` looks like `local@domain`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] otherwise.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace) =>
        {
            Ok(())
        }
        _ => Err(ValidationError::InvalidEmail(email.to_string())),
    }
}

/// Step-by-step builder for [`User`].
#[derive(Debug, Default)]
pub struct UserBuilder {
    id: Option<UserId>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password_hash: Option<String>,
}

impl UserBuilder {
    #[must_use]
    pub fn id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }

    /// Consume the builder, validate, and return a [`User`].
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::Validation`] if a name is missing or the email
    /// is malformed.
    pub fn build(self) -> Result<User, DevbookError> {
        let user = User {
            id: self.id.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            password_hash: self.password_hash.unwrap_or_default(),
        };
        user.validate()?;
        Ok(user)
    }
}
