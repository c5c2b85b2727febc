use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::api::error_response;
use crate::directory::{EmployeeDirectory, EmployeeUpdate};
use crate::model::employee::Employee;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "Ann Lee")]
    pub full_name: String,
    #[schema(example = "ann.lee@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    #[schema(example = "Ann Lee")]
    pub full_name: Option<String>,
    #[schema(example = "ann.lee@company.com", format = "email")]
    pub email: Option<String>,
    #[schema(example = "Engineering")]
    pub department: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Employees retrieved successfully")]
    pub message: String,
    pub data: Vec<Employee>,
    #[schema(example = 10)]
    pub total: usize,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created successfully", body = Object, example = json!({
            "success": true,
            "message": "Employee created successfully"
        })),
        (status = 400, description = "Missing or malformed field", body = Object, example = json!({
            "message": "Employee ID is required"
        })),
        (status = 409, description = "Duplicate employee ID or email", body = Object, example = json!({
            "message": "Employee ID already exists"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    directory: web::Data<EmployeeDirectory>,
    payload: web::Json<CreateEmployee>,
) -> impl Responder {
    match directory
        .create(
            &payload.employee_id,
            &payload.full_name,
            &payload.email,
            &payload.department,
        )
        .await
    {
        Ok(employee) => HttpResponse::Created().json(json!({
            "success": true,
            "message": "Employee created successfully",
            "data": employee
        })),
        Err(e) => error_response(e),
    }
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, most recently created first", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(directory: web::Data<EmployeeDirectory>) -> impl Responder {
    match directory.list().await {
        Ok(employees) => HttpResponse::Ok().json(EmployeeListResponse {
            success: true,
            message: "Employees retrieved successfully".to_string(),
            total: employees.len(),
            data: employees,
        }),
        Err(e) => error_response(e),
    }
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Object),
        (status = 400, description = "Malformed employee ID", body = Object, example = json!({
            "message": "Invalid employee ID format"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    directory: web::Data<EmployeeDirectory>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    match directory.get(&id).await {
        Ok(employee) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Employee retrieved successfully",
            "data": employee
        })),
        Err(e) => error_response(e),
    }
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated successfully", body = Object, example = json!({
            "success": true,
            "message": "Employee updated successfully"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        })),
        (status = 409, description = "Email already taken by another employee", body = Object, example = json!({
            "message": "Email already exists"
        }))
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    directory: web::Data<EmployeeDirectory>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployee>,
) -> impl Responder {
    let id = path.into_inner();
    let payload = payload.into_inner();
    let fields = EmployeeUpdate {
        full_name: payload.full_name,
        email: payload.email,
        department: payload.department,
    };

    match directory.update(&id, fields).await {
        Ok(employee) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Employee updated successfully",
            "data": employee
        })),
        Err(e) => error_response(e),
    }
}

/// Delete Employee (cascades to its attendance records)
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted successfully", body = Object, example = json!({
            "success": true,
            "message": "Employee deleted successfully"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    directory: web::Data<EmployeeDirectory>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    match directory.delete(&id).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Employee deleted successfully"
        })),
        Err(e) => error_response(e),
    }
}
