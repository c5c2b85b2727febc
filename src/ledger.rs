use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::db::{decode_date, decode_timestamp, decode_uuid};
use crate::error::{Error, Result};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, parse_attendance_id};
use crate::model::employee::parse_employee_id;

const RECORD_COLUMNS: &str = "a.id, a.employee_id, a.date, a.status, a.created_at, \
     e.employee_id AS emp_id, e.full_name";

const RECORD_JOIN: &str = "FROM attendance a JOIN employees e ON e.id = a.employee_id";

/// Outcome of a `mark` call. Exactly one record exists for the pair
/// afterwards either way, but callers want to phrase "marked" and "updated"
/// differently.
#[derive(Debug)]
pub struct MarkOutcome {
    pub record: AttendanceRecord,
    pub created: bool,
}

/// Owns per-employee, per-day attendance facts.
///
/// Depends on the employee directory's table for referential validity: the
/// FK (with cascade) ties every record to exactly one live employee, and the
/// `(employee_id, date)` UNIQUE constraint serializes concurrent marks for
/// the same pair at the store.
#[derive(Clone)]
pub struct AttendanceLedger {
    pool: SqlitePool,
}

impl AttendanceLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Upsert the status for `(employee, date)`: one atomic statement, so two
    /// concurrent marks can never produce two records. The second writer
    /// lands on the first's row and its status wins.
    pub async fn mark(&self, employee_id: &str, date: &str, status: &str) -> Result<MarkOutcome> {
        let employee_id = parse_employee_id(employee_id)?;
        let date = parse_date(date, "Date must be in YYYY-MM-DD format")?;
        let status: AttendanceStatus = status
            .trim()
            .parse()
            .map_err(|_| {
                Error::InvalidArgument("Status must be either Present or Absent".to_string())
            })?;

        let employee = sqlx::query("SELECT employee_id, full_name FROM employees WHERE id = ?")
            .bind(employee_id.to_string())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::NotFound("Employee not found"))?;

        let candidate_id = Uuid::new_v4();
        let row = sqlx::query(
            r#"
            INSERT INTO attendance (id, employee_id, date, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (employee_id, date) DO UPDATE SET status = excluded.status
            RETURNING id, created_at
            "#,
        )
        .bind(candidate_id.to_string())
        .bind(employee_id.to_string())
        .bind(date.to_string())
        .bind(status.to_string())
        .bind(Utc::now().to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(map_missing_employee)?;

        // On conflict the store keeps the existing row, so a returned id that
        // differs from our candidate means we updated rather than created.
        let stored_id = decode_uuid(&row.get::<String, _>("id"))?;
        let record = AttendanceRecord {
            id: stored_id,
            employee_id,
            emp_id: employee.get("employee_id"),
            full_name: employee.get("full_name"),
            date,
            status,
            created_at: decode_timestamp(&row.get::<String, _>("created_at"))?,
        };

        Ok(MarkOutcome {
            created: stored_id == candidate_id,
            record,
        })
    }

    /// Every record across all employees, newest date first; with a filter,
    /// only records for that exact date. Employee code and name are joined in
    /// at read time.
    pub async fn list_all(&self, date_filter: Option<&str>) -> Result<Vec<AttendanceRecord>> {
        let date_filter = date_filter
            .map(|d| parse_date(d, "Invalid date format. Use YYYY-MM-DD"))
            .transpose()?;

        let rows = match date_filter {
            Some(date) => {
                let sql =
                    format!("SELECT {RECORD_COLUMNS} {RECORD_JOIN} WHERE a.date = ? ORDER BY a.date DESC");
                sqlx::query(&sql)
                    .bind(date.to_string())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {RECORD_COLUMNS} {RECORD_JOIN} ORDER BY a.date DESC");
                sqlx::query(&sql).fetch_all(&self.pool).await?
            }
        };

        rows.iter().map(row_to_record).collect()
    }

    /// All records for one employee, newest date first. The `YYYY-MM` month
    /// filter bounds from the first day of that month onward only; there is
    /// deliberately no upper bound on the range.
    pub async fn list_for_employee(
        &self,
        employee_id: &str,
        month_filter: Option<&str>,
    ) -> Result<Vec<AttendanceRecord>> {
        let employee_id = parse_employee_id(employee_id)?;

        let exists = sqlx::query("SELECT 1 FROM employees WHERE id = ?")
            .bind(employee_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(Error::NotFound("Employee not found"));
        }

        let since = month_filter.map(parse_month).transpose()?;

        let rows = match since {
            Some(first_of_month) => {
                let sql = format!(
                    "SELECT {RECORD_COLUMNS} {RECORD_JOIN} \
                     WHERE a.employee_id = ? AND a.date >= ? ORDER BY a.date DESC"
                );
                sqlx::query(&sql)
                    .bind(employee_id.to_string())
                    .bind(first_of_month.to_string())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {RECORD_COLUMNS} {RECORD_JOIN} \
                     WHERE a.employee_id = ? ORDER BY a.date DESC"
                );
                sqlx::query(&sql)
                    .bind(employee_id.to_string())
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        rows.iter().map(row_to_record).collect()
    }

    /// Remove exactly one record; the owning employee is untouched.
    pub async fn delete(&self, attendance_id: &str) -> Result<()> {
        let id = parse_attendance_id(attendance_id)?;

        let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Attendance record not found"));
        }
        Ok(())
    }
}

fn parse_date(value: &str, message: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidArgument(message.to_string()))
}

/// `YYYY-MM` → first day of that month.
fn parse_month(value: &str) -> Result<NaiveDate> {
    let invalid = || Error::InvalidArgument("Invalid date format".to_string());

    let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)
}

fn row_to_record(row: &SqliteRow) -> Result<AttendanceRecord> {
    let status: String = row.get("status");
    Ok(AttendanceRecord {
        id: decode_uuid(&row.get::<String, _>("id"))?,
        employee_id: decode_uuid(&row.get::<String, _>("employee_id"))?,
        emp_id: row.get("emp_id"),
        full_name: row.get("full_name"),
        date: decode_date(&row.get::<String, _>("date"))?,
        status: status
            .parse()
            .map_err(|_| Error::StoreUnavailable(format!("corrupt status column: {status}")))?,
        created_at: decode_timestamp(&row.get::<String, _>("created_at"))?,
    })
}

// The employee existence check races with a concurrent delete; the FK
// constraint closes the gap and surfaces here.
fn map_missing_employee(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db) = &err {
        if db.is_foreign_key_violation() {
            return Error::NotFound("Employee not found");
        }
    }
    err.into()
}
