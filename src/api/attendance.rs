use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::api::error_response;
use crate::ledger::AttendanceLedger;
use crate::model::attendance::AttendanceRecord;

#[derive(Deserialize, ToSchema)]
pub struct MarkAttendance {
    /// Server-generated id of the employee being marked.
    #[schema(example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    pub employee_id: String,
    #[schema(example = "2024-03-01", format = "date")]
    pub date: String,
    #[schema(example = "Present")]
    pub status: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    /// Exact date to filter on, `YYYY-MM-DD`.
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeAttendanceQuery {
    /// Month to filter from, `YYYY-MM`. Records from the first day of this
    /// month onward are returned.
    pub month: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Attendance records retrieved successfully")]
    pub message: String,
    pub data: Vec<AttendanceRecord>,
    #[schema(example = 10)]
    pub total: usize,
}

/// Mark attendance for an employee (creates or overwrites the day's record)
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance marked or updated", body = Object, example = json!({
            "success": true,
            "message": "Attendance marked successfully"
        })),
        (status = 400, description = "Malformed date or status", body = Object, example = json!({
            "message": "Status must be either Present or Absent"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    ledger: web::Data<AttendanceLedger>,
    payload: web::Json<MarkAttendance>,
) -> impl Responder {
    match ledger
        .mark(&payload.employee_id, &payload.date, &payload.status)
        .await
    {
        Ok(outcome) => {
            let message = if outcome.created {
                "Attendance marked successfully"
            } else {
                "Attendance updated successfully"
            };
            HttpResponse::Created().json(json!({
                "success": true,
                "message": message,
                "data": outcome.record
            }))
        }
        Err(e) => error_response(e),
    }
}

/// Get all attendance records, optionally for one exact date
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance records, newest date first", body = AttendanceListResponse),
        (status = 400, description = "Malformed date filter", body = Object, example = json!({
            "message": "Invalid date format. Use YYYY-MM-DD"
        }))
    ),
    tag = "Attendance"
)]
pub async fn get_all_attendance(
    ledger: web::Data<AttendanceLedger>,
    query: web::Query<AttendanceQuery>,
) -> impl Responder {
    match ledger.list_all(query.date.as_deref()).await {
        Ok(records) => HttpResponse::Ok().json(AttendanceListResponse {
            success: true,
            message: "Attendance records retrieved successfully".to_string(),
            total: records.len(),
            data: records,
        }),
        Err(e) => error_response(e),
    }
}

/// Get attendance records for a specific employee
#[utoipa::path(
    get,
    path = "/api/attendance/employee/{id}",
    params(
        ("id", Path, description = "Employee ID"),
        EmployeeAttendanceQuery
    ),
    responses(
        (status = 200, description = "Attendance records for the employee", body = AttendanceListResponse),
        (status = 400, description = "Malformed month filter", body = Object, example = json!({
            "message": "Invalid date format"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn get_employee_attendance(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<String>,
    query: web::Query<EmployeeAttendanceQuery>,
) -> impl Responder {
    let id = path.into_inner();

    match ledger.list_for_employee(&id, query.month.as_deref()).await {
        Ok(records) => HttpResponse::Ok().json(AttendanceListResponse {
            success: true,
            message: "Attendance records retrieved successfully".to_string(),
            total: records.len(),
            data: records,
        }),
        Err(e) => error_response(e),
    }
}

/// Delete an attendance record
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(
        ("id", Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Attendance record deleted successfully", body = Object, example = json!({
            "success": true,
            "message": "Attendance record deleted successfully"
        })),
        (status = 404, description = "Attendance record not found", body = Object, example = json!({
            "message": "Attendance record not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    ledger: web::Data<AttendanceLedger>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    match ledger.delete(&id).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Attendance record deleted successfully"
        })),
        Err(e) => error_response(e),
    }
}
