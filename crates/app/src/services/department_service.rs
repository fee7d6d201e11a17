//! Department service — use-cases for managing departments.

use devbook_domain::department::Department;
use devbook_domain::error::DevbookError;
use devbook_domain::id::DepartmentId;

use crate::dto::{DepartmentDto, DepartmentInput};
use crate::ports::DepartmentRepository;

/// Application service for department CRUD operations.
pub struct DepartmentService<R> {
    repo: R,
}

impl<R: DepartmentRepository> DepartmentService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new department after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, input), fields(department_name = %input.name))]
    pub async fn create_department(
        &self,
        input: DepartmentInput,
    ) -> Result<DepartmentDto, DevbookError> {
        let department = Department::builder().name(input.name).build()?;
        self.repo.create(department).await.map(DepartmentDto::from)
    }

    /// Look up a department by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::NotFound`] when no department with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_department(&self, id: DepartmentId) -> Result<DepartmentDto, DevbookError> {
        self.repo
            .get_by_id(id)
            .await?
            .map(DepartmentDto::from)
            .ok_or_else(|| DevbookError::not_found("Department", id))
    }

    /// List all departments.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_departments(&self) -> Result<Vec<DepartmentDto>, DevbookError> {
        let departments = self.repo.get_all().await?;
        Ok(departments.into_iter().map(DepartmentDto::from).collect())
    }

    /// Rename an existing department.
    ///
    /// # Errors
    ///
    /// Returns [`DevbookError::NotFound`] when the department does not exist,
    /// [`DevbookError::Validation`] if invariants fail, or a storage error.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_department(
        &self,
        id: DepartmentId,
        input: DepartmentInput,
    ) -> Result<DepartmentDto, DevbookError> {
        let mut department = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| DevbookError::not_found("Department", id))?;
        department.name = input.name;
        department.validate()?;
        self.repo.update(department).await.map(DepartmentDto::from)
    }

    /// Delete a department by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_department(&self, id: DepartmentId) -> Result<(), DevbookError> {
        self.repo.delete(id).await
    }
}
