pub mod attendance;
pub mod employee;

use actix_web::{HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;
use tracing::error;

use crate::error::Error;

/// Map the failure taxonomy onto HTTP statuses. Store failures are the only
/// retryable kind and the only ones worth logging server-side.
pub(crate) fn error_response(err: Error) -> HttpResponse {
    match err {
        Error::InvalidArgument(msg) => HttpResponse::BadRequest().json(json!({ "message": msg })),
        Error::NotFound(msg) => HttpResponse::NotFound().json(json!({ "message": msg })),
        Error::Conflict(msg) => HttpResponse::Conflict().json(json!({ "message": msg })),
        Error::StoreUnavailable(msg) => {
            error!(error = %msg, "Store operation failed");
            HttpResponse::ServiceUnavailable().json(json!({
                "message": "Database unavailable, try again later"
            }))
        }
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = Object, example = json!({
            "status": "ok",
            "timestamp": "2024-03-01T09:00:00+00:00"
        }))
    ),
    tag = "Health"
)]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339()
    }))
}
