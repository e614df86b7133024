//! Integration tests for admin accounts and authentication.
//!
//! These tests require:
//! - A running `PostgreSQL` database pointed at by `DATABASE_URL`
//!
//! Run with: cargo test -p kirana-integration-tests -- --ignored

use kirana_integration_tests::{test_pool, unique_suffix};
use kirana_server::db::AdminRepository;
use kirana_server::services::auth::{AuthError, AuthService};

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_authenticate_roundtrip() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);
    let username = format!("admin-{}", unique_suffix());

    let id = auth
        .create_admin(&username, "secret-password", false)
        .await
        .expect("create");

    let admin = auth
        .authenticate(&username, "secret-password")
        .await
        .expect("authenticate");
    assert_eq!(admin.id, id);
    assert_eq!(admin.username, username);
    assert!(!admin.is_master);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_wrong_password_and_unknown_user_look_alike() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);
    let username = format!("admin-{}", unique_suffix());

    auth.create_admin(&username, "secret-password", false)
        .await
        .expect("create");

    let wrong_password = auth.authenticate(&username, "other-password").await;
    let unknown_user = auth.authenticate("no-such-user", "other-password").await;

    // Both rejections carry the same error so usernames cannot be probed
    assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
    assert!(matches!(unknown_user, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_duplicate_username_is_rejected() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);
    let username = format!("admin-{}", unique_suffix());

    auth.create_admin(&username, "secret-password", false)
        .await
        .expect("first create");

    let duplicate = auth.create_admin(&username, "other-password", false).await;
    assert!(matches!(duplicate, Err(AuthError::DuplicateUsername)));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_short_password_is_rejected() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);
    let username = format!("admin-{}", unique_suffix());

    let result = auth.create_admin(&username, "short", false).await;
    assert!(matches!(result, Err(AuthError::WeakPassword(_))));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_master_admin_is_never_deletable() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);
    let username = format!("master-{}", unique_suffix());

    let id = auth
        .create_admin(&username, "secret-password", true)
        .await
        .expect("create master");

    let result = auth.delete_admin(id).await;
    assert!(matches!(result, Err(AuthError::CannotDeleteMaster)));

    // Still present afterwards
    let admin = AdminRepository::new(&pool)
        .get_by_id(id)
        .await
        .expect("get")
        .expect("master survives");
    assert!(admin.is_master);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_regular_admin_is_deletable() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);
    let username = format!("admin-{}", unique_suffix());

    let id = auth
        .create_admin(&username, "secret-password", false)
        .await
        .expect("create");

    auth.delete_admin(id).await.expect("delete");
    assert!(matches!(auth.delete_admin(id).await, Err(AuthError::NotFound)));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_is_master_false_for_unknown_id() {
    let pool = test_pool().await;
    let repo = AdminRepository::new(&pool);

    // Stale session IDs quietly lose privilege instead of erroring
    let is_master = repo
        .is_master(kirana_core::AdminId::new(i32::MAX))
        .await
        .expect("query");
    assert!(!is_master);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_list_all_puts_masters_first() {
    let pool = test_pool().await;
    let auth = AuthService::new(&pool);
    let suffix = unique_suffix();

    auth.create_admin(&format!("reg-{suffix}"), "secret-password", false)
        .await
        .expect("create regular");
    auth.create_admin(&format!("mas-{suffix}"), "secret-password", true)
        .await
        .expect("create master");

    let admins = AdminRepository::new(&pool).list_all().await.expect("list");
    let first_regular = admins.iter().position(|a| !a.is_master);
    let last_master = admins.iter().rposition(|a| a.is_master);

    if let (Some(regular), Some(master)) = (first_regular, last_master) {
        assert!(master < regular, "masters sort before regular admins");
    }
}
