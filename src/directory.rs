use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::db::{decode_timestamp, decode_uuid};
use crate::error::{Error, Result};
use crate::model::employee::{Employee, parse_employee_id, validate_email, validate_required};

const EMPLOYEE_COLUMNS: &str =
    "id, employee_id, full_name, email, department, created_at, updated_at";

/// Partial update payload: omitted fields are left untouched.
#[derive(Debug, Default)]
pub struct EmployeeUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

/// Owns employee identity and the uniqueness rules around it.
///
/// Holds only the pool handle; no entity is cached in-process, so every read
/// reflects the store's current state. All writes are single statements and
/// the store's UNIQUE / FK constraints serialize concurrent writers; the
/// pre-checks exist to tell the caller *which* field collided. A future
/// dropped mid-operation leaves no partial state behind.
#[derive(Clone)]
pub struct EmployeeDirectory {
    pool: SqlitePool,
}

impl EmployeeDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        employee_id: &str,
        full_name: &str,
        email: &str,
        department: &str,
    ) -> Result<Employee> {
        let employee_id = validate_required("Employee ID", employee_id)?;
        let full_name = validate_required("Full Name", full_name)?;
        let email = validate_email(email)?;
        let department = validate_required("Department", department)?;

        // Checked independently so the caller can tell which field collided.
        if self.code_exists(&employee_id).await? {
            return Err(Error::Conflict("Employee ID already exists"));
        }
        if self.email_exists(&email, None).await? {
            return Err(Error::Conflict("Email already exists"));
        }

        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4(),
            employee_id,
            full_name,
            email,
            department,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO employees (id, employee_id, full_name, email, department, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(employee.id.to_string())
        .bind(&employee.employee_id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(employee.created_at.to_rfc3339())
        .bind(employee.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(employee)
    }

    pub async fn get(&self, id: &str) -> Result<Employee> {
        let id = parse_employee_id(id)?;
        self.fetch(id)
            .await?
            .ok_or(Error::NotFound("Employee not found"))
    }

    /// All employees, most recently created first. Empty is a valid result.
    pub async fn list(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_employee).collect()
    }

    /// Apply the supplied fields and advance `updated_at`. An update with no
    /// fields still counts as a mutation and advances the timestamp.
    pub async fn update(&self, id: &str, fields: EmployeeUpdate) -> Result<Employee> {
        let id = parse_employee_id(id)?;
        let mut employee = self
            .fetch(id)
            .await?
            .ok_or(Error::NotFound("Employee not found"))?;

        if let Some(full_name) = fields.full_name.as_deref() {
            employee.full_name = validate_required("Full Name", full_name)?;
        }
        if let Some(email) = fields.email.as_deref() {
            let email = validate_email(email)?;
            // Uniqueness only matters against *other* employees.
            if email != employee.email && self.email_exists(&email, Some(id)).await? {
                return Err(Error::Conflict("Email already exists"));
            }
            employee.email = email;
        }
        if let Some(department) = fields.department.as_deref() {
            employee.department = validate_required("Department", department)?;
        }
        employee.updated_at = Utc::now();

        let result = sqlx::query(
            "UPDATE employees SET full_name = ?, email = ?, department = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(employee.updated_at.to_rfc3339())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Employee not found"));
        }
        Ok(employee)
    }

    /// Remove the employee and, through the store's cascade rule, every
    /// attendance record it owns, as one atomic unit.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_employee_id(id)?;

        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Employee not found"));
        }
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Employee>> {
        let row = sqlx::query(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_employee).transpose()
    }

    async fn code_exists(&self, employee_id: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM employees WHERE employee_id = ?")
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> Result<bool> {
        let row = match exclude {
            Some(id) => {
                sqlx::query("SELECT 1 FROM employees WHERE email = ? AND id != ?")
                    .bind(email)
                    .bind(id.to_string())
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("SELECT 1 FROM employees WHERE email = ?")
                    .bind(email)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        Ok(row.is_some())
    }
}

fn row_to_employee(row: &SqliteRow) -> Result<Employee> {
    Ok(Employee {
        id: decode_uuid(&row.get::<String, _>("id"))?,
        employee_id: row.get("employee_id"),
        full_name: row.get("full_name"),
        email: row.get("email"),
        department: row.get("department"),
        created_at: decode_timestamp(&row.get::<String, _>("created_at"))?,
        updated_at: decode_timestamp(&row.get::<String, _>("updated_at"))?,
    })
}

// The UNIQUE constraints are the backstop for writers racing past the
// pre-checks: the losing insert surfaces here, not as a duplicate row.
// `employee_id` is immutable after creation, so on UPDATE only the email
// constraint can fire.
fn map_unique_violation(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return if db.message().contains("employees.email") {
                Error::Conflict("Email already exists")
            } else {
                Error::Conflict("Employee ID already exists")
            };
        }
    }
    err.into()
}
