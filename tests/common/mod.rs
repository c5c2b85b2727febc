// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use hrms_lite::db::init_db;
use hrms_lite::directory::EmployeeDirectory;
use hrms_lite::ledger::AttendanceLedger;
use hrms_lite::model::employee::Employee;
use tempfile::TempDir;

/// Helper to create both components on a temporary database
pub async fn test_store() -> Result<(EmployeeDirectory, AttendanceLedger, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let pool = init_db(&format!("sqlite:{}", db_path.display())).await?;
    Ok((
        EmployeeDirectory::new(pool.clone()),
        AttendanceLedger::new(pool),
        temp_dir,
    ))
}

/// Standard fixture employee
pub async fn create_ann(directory: &EmployeeDirectory) -> Result<Employee> {
    Ok(directory
        .create("E1", "Ann Lee", "ann@x.com", "Eng")
        .await?)
}

pub async fn create_bob(directory: &EmployeeDirectory) -> Result<Employee> {
    Ok(directory
        .create("E2", "Bob Tan", "bob@x.com", "Sales")
        .await?)
}
