//! Integration tests for customer care issues and contact messages.
//!
//! These tests require:
//! - A running `PostgreSQL` database pointed at by `DATABASE_URL`
//!
//! Run with: cargo test -p kirana-integration-tests -- --ignored

use kirana_integration_tests::{test_pool, unique_suffix};
use kirana_server::db::{
    ContactMessageRepository, CustomerCareRepository, RepositoryError, customer_care::NewIssue,
};

fn sample_issue(email: &str) -> NewIssue {
    NewIssue {
        name: "Test Customer".to_owned(),
        email: email.to_owned(),
        phone: "9876543210".to_owned(),
        order_id: Some("order #42".to_owned()),
        issue_type: "delivery".to_owned(),
        description: "Order has not arrived".to_owned(),
        priority: "normal".to_owned(),
    }
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_new_issue_starts_open_without_timestamps() {
    let pool = test_pool().await;
    let repo = CustomerCareRepository::new(&pool);
    let email = format!("care-{}@example.com", unique_suffix());

    let id = repo.create(sample_issue(&email)).await.expect("create");
    let issue = repo.get_by_id(id).await.expect("get").expect("exists");

    assert_eq!(issue.status, "open");
    assert!(issue.admin_response.is_none());
    assert!(issue.resolved_at.is_none());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_resolved_at_stamped_only_on_resolved() {
    let pool = test_pool().await;
    let repo = CustomerCareRepository::new(&pool);
    let email = format!("care-{}@example.com", unique_suffix());

    let id = repo.create(sample_issue(&email)).await.expect("create");

    repo.respond(id, "Looking into it", "in_progress")
        .await
        .expect("respond");
    let issue = repo.get_by_id(id).await.expect("get").expect("exists");
    assert!(issue.resolved_at.is_none());

    repo.respond(id, "Delivered today", "resolved")
        .await
        .expect("resolve");
    let issue = repo.get_by_id(id).await.expect("get").expect("exists");
    assert_eq!(issue.status, "resolved");
    assert_eq!(issue.admin_response.as_deref(), Some("Delivered today"));
    assert!(issue.resolved_at.is_some());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_resolved_at_survives_reopening() {
    let pool = test_pool().await;
    let repo = CustomerCareRepository::new(&pool);
    let email = format!("care-{}@example.com", unique_suffix());

    let id = repo.create(sample_issue(&email)).await.expect("create");
    repo.respond(id, "Done", "resolved").await.expect("resolve");

    let resolved_at = repo
        .get_by_id(id)
        .await
        .expect("get")
        .expect("exists")
        .resolved_at
        .expect("stamped");

    repo.respond(id, "Actually not done", "open")
        .await
        .expect("reopen");

    let issue = repo.get_by_id(id).await.expect("get").expect("exists");
    assert_eq!(issue.status, "open");
    assert_eq!(issue.resolved_at, Some(resolved_at));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_respond_to_unknown_issue_is_not_found() {
    let pool = test_pool().await;
    let repo = CustomerCareRepository::new(&pool);

    let result = repo
        .respond(kirana_core::IssueId::new(i32::MAX), "hello", "open")
        .await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_contact_message_mark_read_is_idempotent() {
    let pool = test_pool().await;
    let repo = ContactMessageRepository::new(&pool);
    let email = format!("msg-{}@example.com", unique_suffix());

    let id = repo
        .create("Test Customer", &email, "Do you stock jaggery?")
        .await
        .expect("create");

    let message = repo.get_by_id(id).await.expect("get").expect("exists");
    assert!(!message.is_read);

    repo.mark_read(id).await.expect("first mark");
    repo.mark_read(id).await.expect("repeated mark");

    let message = repo.get_by_id(id).await.expect("get").expect("exists");
    assert!(message.is_read);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_reply_forces_message_read() {
    let pool = test_pool().await;
    let repo = ContactMessageRepository::new(&pool);
    let email = format!("msg-{}@example.com", unique_suffix());

    let id = repo
        .create("Test Customer", &email, "Opening hours on Sunday?")
        .await
        .expect("create");

    repo.reply(id, "Open 8am to 9pm every day").await.expect("reply");

    let message = repo.get_by_id(id).await.expect("get").expect("exists");
    assert!(message.is_read);
    assert_eq!(
        message.admin_reply.as_deref(),
        Some("Open 8am to 9pm every day")
    );
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_find_by_email_is_case_insensitive() {
    let pool = test_pool().await;
    let repo = ContactMessageRepository::new(&pool);
    let local = format!("Mixed-{}", unique_suffix());
    let email = format!("{local}@Example.com");

    repo.create("Test Customer", &email, "First message")
        .await
        .expect("create");
    repo.create("Test Customer", &email.to_lowercase(), "Second message")
        .await
        .expect("create");

    let found = repo
        .find_by_email(&email.to_uppercase())
        .await
        .expect("find");
    assert_eq!(found.len(), 2);
}
