use thiserror::Error;

/// Failure taxonomy shared by the employee directory and the attendance
/// ledger. Every kind is recoverable by the caller; `StoreUnavailable` is the
/// only one worth retrying.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed identifier, date, status, or an empty required field.
    #[error("{0}")]
    InvalidArgument(String),

    /// Referenced employee or attendance record does not exist.
    #[error("{0}")]
    NotFound(&'static str),

    /// A uniqueness rule on `employee_id` or `email` would be violated.
    #[error("{0}")]
    Conflict(&'static str),

    /// The store could not be reached or a statement failed for transient
    /// reasons.
    #[error("database error: {0}")]
    StoreUnavailable(String),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::StoreUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
