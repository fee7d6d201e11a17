//! `SQLite` implementation of [`DepartmentRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use devbook_app::ports::DepartmentRepository;
use devbook_domain::department::Department;
use devbook_domain::error::DevbookError;
use devbook_domain::id::DepartmentId;

use crate::error::{StorageError, decode_error};

/// Wrapper for converting database rows into domain [`Department`].
struct Wrapper(Department);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;

        let id = DepartmentId::from_str(&id).map_err(decode_error)?;

        Ok(Self(Department { id, name }))
    }
}

const INSERT: &str = "INSERT INTO departments (id, name) VALUES (?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM departments WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM departments ORDER BY name";
const UPDATE: &str = "UPDATE departments SET name = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM departments WHERE id = ?";

/// `SQLite`-backed department repository.
pub struct SqliteDepartmentRepository {
    pool: SqlitePool,
}

impl SqliteDepartmentRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DepartmentRepository for SqliteDepartmentRepository {
    fn create(
        &self,
        department: Department,
    ) -> impl Future<Output = Result<Department, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(department.id.to_string())
                .bind(&department.name)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(department)
        }
    }

    fn get_by_id(
        &self,
        id: DepartmentId,
    ) -> impl Future<Output = Result<Option<Department>, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Department>, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        department: Department,
    ) -> impl Future<Output = Result<Department, DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&department.name)
                .bind(department.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(department)
        }
    }

    fn delete(&self, id: DepartmentId) -> impl Future<Output = Result<(), DevbookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
