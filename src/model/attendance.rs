use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::Error;

/// Caller-supplied attendance record ids must be well-formed UUIDs.
pub fn parse_attendance_id(id: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(id.trim())
        .map_err(|_| Error::InvalidArgument("Invalid attendance ID format".to_string()))
}

/// Per-day attendance status. A single value per employee per day; no
/// shift or time-of-day tracking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// One attendance fact for one employee on one calendar date.
///
/// `emp_id` and `full_name` belong to the owning employee and are joined in
/// at read time, never stored on the record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(value_type = String, example = "9b2dd793-2c21-4fbb-b0a2-1d846c3b11b1")]
    pub id: Uuid,

    /// Server-generated id of the owning employee.
    #[schema(value_type = String, example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    pub employee_id: Uuid,

    /// Owning employee's short code.
    #[schema(example = "EMP-001")]
    pub emp_id: String,

    #[schema(example = "Ann Lee")]
    pub full_name: String,

    #[schema(value_type = String, format = "date", example = "2024-03-01")]
    pub date: NaiveDate,

    pub status: AttendanceStatus,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}
