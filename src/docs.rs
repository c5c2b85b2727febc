use crate::api::attendance::{AttendanceListResponse, MarkAttendance};
use crate::api::employee::{CreateEmployee, EmployeeListResponse, UpdateEmployee};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A lightweight employee roster and daily attendance tracker.

### 🔹 Key Features
- **Employee Management**
  - Create, update, list, and view employee profiles
- **Attendance Management**
  - One Present/Absent record per employee per day; marking twice updates in place

### 📦 Response Format
- JSON-based RESTful responses

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::health,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::get_all_attendance,
        crate::api::attendance::get_employee_attendance,
        crate::api::attendance::delete_attendance
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            UpdateEmployee,
            EmployeeListResponse,
            AttendanceRecord,
            AttendanceStatus,
            MarkAttendance,
            AttendanceListResponse
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
