//! Department — the organisational unit that owns devices.

use serde::{Deserialize, Serialize};

use crate::error::{DevbookError, ValidationError};
use crate::id::DepartmentId;

/// An organisational unit such as "Radiology" or "IT support".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

impl Department {
    /// Create a builder for constructing a [`Department`].
    #[must_use]
    pub fn builder() -> DepartmentBuilder {
        DepartmentBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), DevbookError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Department`].
#[derive(Debug, Default)]
pub struct DepartmentBuilder {
    id: Option<DepartmentId>,
    name: Option<String>,
}

impl DepartmentBuilder {
    #[must_use]
    pub fn id(mut self, id: DepartmentId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Consume the builder, validate, and return a [`Department`].
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Department, DevbookError> {
        let department = Department {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
        };
        department.validate()?;
        Ok(department)
    }
}
