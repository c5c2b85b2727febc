use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::Error;

/// Initial schema: employees + attendance, with the uniqueness and cascade
/// rules enforced as store-level constraints.
const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Open the pool (creating the database file if needed) and apply the schema.
/// Retries the initial connect a few times before giving up, so the process
/// survives a store that comes up slightly later than we do.
pub async fn init_db(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .context("Invalid DATABASE_URL")?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(10));

    let mut attempt = 1;
    let pool = loop {
        match SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => break pool,
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                warn!(error = %e, attempt, "Database connect failed, retrying");
                actix_web::rt::time::sleep(CONNECT_RETRY_DELAY).await;
                attempt += 1;
            }
            Err(e) => return Err(e).context("Failed to connect to database"),
        }
    };

    sqlx::raw_sql(MIGRATION_001_INITIAL)
        .execute(&pool)
        .await
        .context("Failed to apply initial schema")?;

    info!("Database ready");
    Ok(pool)
}

// Stored-column decoders. Ids and timestamps live in TEXT columns; a value
// that fails to parse means the row was written outside the defined
// operations.

pub(crate) fn decode_uuid(value: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|e| Error::StoreUnavailable(format!("corrupt id column: {e}")))
}

pub(crate) fn decode_timestamp(value: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::StoreUnavailable(format!("corrupt timestamp column: {e}")))
}

pub(crate) fn decode_date(value: &str) -> Result<chrono::NaiveDate, Error> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| Error::StoreUnavailable(format!("corrupt date column: {e}")))
}
