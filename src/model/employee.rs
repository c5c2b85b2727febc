use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
        "employee_id": "EMP-001",
        "full_name": "Ann Lee",
        "email": "ann.lee@company.com",
        "department": "Engineering",
        "created_at": "2024-03-01T09:00:00+00:00",
        "updated_at": "2024-03-01T09:00:00+00:00"
    })
)]
pub struct Employee {
    /// Server-generated, immutable.
    #[schema(value_type = String, example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    pub id: Uuid,

    /// Caller-supplied short code, unique across all employees.
    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "Ann Lee")]
    pub full_name: String,

    #[schema(example = "ann.lee@company.com", format = "email")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    /// Advances on every mutation.
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

/// Reject fields that are empty once surrounding whitespace is stripped.
/// Returns the trimmed value, which is what gets stored.
pub fn validate_required(field: &'static str, value: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Caller-supplied employee ids must be well-formed UUIDs.
pub fn parse_employee_id(id: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(id.trim())
        .map_err(|_| Error::InvalidArgument("Invalid employee ID format".to_string()))
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain.
pub fn validate_email(value: &str) -> Result<String, Error> {
    let email = validate_required("Email", value)?;

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !well_formed {
        return Err(Error::InvalidArgument("Invalid email address".to_string()));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_are_trimmed() {
        assert_eq!(validate_required("Department", "  Eng  ").unwrap(), "Eng");
        assert!(validate_required("Department", "   ").is_err());
        assert!(validate_required("Department", "").is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("ann@x.com").is_ok());
        assert!(validate_email("ann.lee+hr@sub.company.io").is_ok());
        assert!(validate_email("ann").is_err());
        assert!(validate_email("@x.com").is_err());
        assert!(validate_email("ann@").is_err());
        assert!(validate_email("ann@nodot").is_err());
        assert!(validate_email("ann@.com").is_err());
        assert!(validate_email("a nn@x.com").is_err());
        assert!(validate_email("ann@x@y.com").is_err());
    }
}
