use anyhow::Result;
use hrms_lite::directory::EmployeeUpdate;
use hrms_lite::error::Error;

mod common;
use common::{create_ann, create_bob, test_store};

#[tokio::test]
async fn create_then_get_round_trips_every_field() -> Result<()> {
    let (directory, _ledger, _temp) = test_store().await?;

    let created = create_ann(&directory).await?;
    assert_eq!(created.created_at, created.updated_at);

    let fetched = directory.get(&created.id.to_string()).await?;
    assert_eq!(fetched, created);

    Ok(())
}

#[tokio::test]
async fn create_rejects_empty_and_malformed_fields() -> Result<()> {
    let (directory, _ledger, _temp) = test_store().await?;

    let cases = [
        ("", "Ann Lee", "ann@x.com", "Eng"),
        ("E1", "   ", "ann@x.com", "Eng"),
        ("E1", "Ann Lee", "not-an-email", "Eng"),
        ("E1", "Ann Lee", "ann@x.com", ""),
    ];
    for (code, name, email, dept) in cases {
        let err = directory.create(code, name, email, dept).await.unwrap_err();
        assert!(
            matches!(err, Error::InvalidArgument(_)),
            "expected InvalidArgument for {code:?}/{name:?}/{email:?}/{dept:?}, got {err:?}"
        );
    }

    // Nothing was persisted along the way
    assert!(directory.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn create_stores_trimmed_values() -> Result<()> {
    let (directory, _ledger, _temp) = test_store().await?;

    let employee = directory
        .create("  E7  ", " Ann Lee ", " ann@x.com ", " Eng ")
        .await?;
    assert_eq!(employee.employee_id, "E7");
    assert_eq!(employee.full_name, "Ann Lee");
    assert_eq!(employee.email, "ann@x.com");
    assert_eq!(employee.department, "Eng");

    Ok(())
}

#[tokio::test]
async fn duplicate_code_and_email_conflict_independently() -> Result<()> {
    let (directory, _ledger, _temp) = test_store().await?;
    create_ann(&directory).await?;

    let err = directory
        .create("E1", "Someone Else", "other@x.com", "Ops")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    assert_eq!(err.to_string(), "Employee ID already exists");

    let err = directory
        .create("E9", "Someone Else", "ann@x.com", "Ops")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    assert_eq!(err.to_string(), "Email already exists");

    assert_eq!(directory.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn concurrent_creates_with_same_code_admit_exactly_one() -> Result<()> {
    let (directory, _ledger, _temp) = test_store().await?;

    let (a, b) = tokio::join!(
        directory.create("E1", "Ann Lee", "ann@x.com", "Eng"),
        directory.create("E1", "Bob Tan", "bob@x.com", "Sales"),
    );

    let results = [a, b];
    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 1, "exactly one concurrent create may win");
    for result in results {
        if let Err(err) = result {
            assert!(matches!(err, Error::Conflict(_)), "loser got {err:?}");
        }
    }

    assert_eq!(directory.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn get_distinguishes_malformed_from_missing() -> Result<()> {
    let (directory, _ledger, _temp) = test_store().await?;

    let err = directory.get("not-a-uuid").await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = directory
        .get("7c9e6679-7425-40de-944b-e07fc1f90ae7")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(err.to_string(), "Employee not found");

    Ok(())
}

#[tokio::test]
async fn list_is_newest_first() -> Result<()> {
    let (directory, _ledger, _temp) = test_store().await?;

    assert!(directory.list().await?.is_empty());

    let first = create_ann(&directory).await?;
    let second = create_bob(&directory).await?;
    let third = directory
        .create("E3", "Cyn Wu", "cyn@x.com", "Eng")
        .await?;

    let listed: Vec<_> = directory.list().await?.into_iter().map(|e| e.id).collect();
    assert_eq!(listed, vec![third.id, second.id, first.id]);

    Ok(())
}

#[tokio::test]
async fn update_changes_only_supplied_fields() -> Result<()> {
    let (directory, _ledger, _temp) = test_store().await?;
    let created = create_ann(&directory).await?;

    let updated = directory
        .update(
            &created.id.to_string(),
            EmployeeUpdate {
                department: Some("Platform".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.department, "Platform");
    assert_eq!(updated.full_name, created.full_name);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.employee_id, created.employee_id);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);

    // The store agrees with the returned value
    let fetched = directory.get(&created.id.to_string()).await?;
    assert_eq!(fetched, updated);

    Ok(())
}

#[tokio::test]
async fn update_with_no_fields_still_advances_updated_at() -> Result<()> {
    let (directory, _ledger, _temp) = test_store().await?;
    let created = create_ann(&directory).await?;

    let updated = directory
        .update(&created.id.to_string(), EmployeeUpdate::default())
        .await?;

    assert_eq!(updated.full_name, created.full_name);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.department, created.department);
    assert!(updated.updated_at > created.updated_at);

    Ok(())
}

#[tokio::test]
async fn update_email_checks_only_other_employees() -> Result<()> {
    let (directory, _ledger, _temp) = test_store().await?;
    let ann = create_ann(&directory).await?;
    let bob = create_bob(&directory).await?;

    // Re-supplying your own email is not a conflict
    let same = directory
        .update(
            &ann.id.to_string(),
            EmployeeUpdate {
                email: Some("ann@x.com".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(same.email, "ann@x.com");

    // Taking someone else's is
    let err = directory
        .update(
            &bob.id.to_string(),
            EmployeeUpdate {
                email: Some("ann@x.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    assert_eq!(err.to_string(), "Email already exists");

    Ok(())
}

#[tokio::test]
async fn update_validates_supplied_fields() -> Result<()> {
    let (directory, _ledger, _temp) = test_store().await?;
    let ann = create_ann(&directory).await?;

    let err = directory
        .update(
            &ann.id.to_string(),
            EmployeeUpdate {
                email: Some("nope".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = directory
        .update(
            &ann.id.to_string(),
            EmployeeUpdate {
                full_name: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    // Failed updates leave the employee untouched
    let fetched = directory.get(&ann.id.to_string()).await?;
    assert_eq!(fetched, ann);

    Ok(())
}

#[tokio::test]
async fn update_unknown_employee_is_not_found() -> Result<()> {
    let (directory, _ledger, _temp) = test_store().await?;

    let err = directory
        .update(
            "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            EmployeeUpdate::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn delete_removes_employee_once() -> Result<()> {
    let (directory, _ledger, _temp) = test_store().await?;
    let ann = create_ann(&directory).await?;

    directory.delete(&ann.id.to_string()).await?;

    let err = directory.get(&ann.id.to_string()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = directory.delete(&ann.id.to_string()).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn delete_cascades_to_attendance() -> Result<()> {
    let (directory, ledger, _temp) = test_store().await?;
    let ann = create_ann(&directory).await?;
    let bob = create_bob(&directory).await?;
    let ann_id = ann.id.to_string();

    ledger.mark(&ann_id, "2024-03-01", "Present").await?;
    ledger.mark(&ann_id, "2024-03-02", "Absent").await?;
    ledger
        .mark(&bob.id.to_string(), "2024-03-01", "Present")
        .await?;

    directory.delete(&ann_id).await?;

    let err = ledger.list_for_employee(&ann_id, None).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    // Only Bob's record survives, and none reference Ann
    let remaining = ledger.list_all(None).await?;
    assert_eq!(remaining.len(), 1);
    assert!(remaining.iter().all(|r| r.employee_id == bob.id));

    Ok(())
}
