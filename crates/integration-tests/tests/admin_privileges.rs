//! HTTP-level tests for the admin privilege model.
//!
//! These drive the real router (session layer included) with in-process
//! requests, so the extractor behavior is what production sees.
//!
//! These tests require:
//! - A running `PostgreSQL` database pointed at by `DATABASE_URL`
//!
//! Run with: cargo test -p kirana-integration-tests -- --ignored

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use kirana_integration_tests::{test_app, test_pool, unique_suffix};
use kirana_server::services::auth::AuthService;

/// Log in through the real login route and return the session cookie.
async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(format!(
                    "username={username}&password={password}"
                )))
                .expect("request"),
        )
        .await
        .expect("login response");

    assert_eq!(response.status(), StatusCode::SEE_OTHER, "login succeeds");
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie set")
        .to_str()
        .expect("cookie is ascii")
        .split(';')
        .next()
        .expect("cookie pair")
        .to_owned()
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_admin_routes_require_a_session() {
    let pool = test_pool().await;
    let app = test_app(&pool).await;

    // Form surface redirects to login
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/orders")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // API surface gets 401
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/messages/1/delete")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_non_master_cannot_create_admins() {
    let pool = test_pool().await;
    let app = test_app(&pool).await;
    let username = format!("regular-{}", unique_suffix());

    AuthService::new(&pool)
        .create_admin(&username, "secret-password", false)
        .await
        .expect("create regular admin");
    let cookie = login(&app, &username, "secret-password").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/admins/add")
                .header(header::COOKIE, cookie)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=someone&password=longenough"))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_master_cannot_delete_their_own_account() {
    let pool = test_pool().await;
    let app = test_app(&pool).await;
    let username = format!("master-{}", unique_suffix());

    let id = AuthService::new(&pool)
        .create_admin(&username, "secret-password", true)
        .await
        .expect("create master admin");
    let cookie = login(&app, &username, "secret-password").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/admin/admins/{}/delete", id.as_i32()))
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL database (DATABASE_URL)"]
async fn test_revoked_master_loses_privilege_on_next_request() {
    let pool = test_pool().await;
    let app = test_app(&pool).await;
    let username = format!("demoted-{}", unique_suffix());

    // A privilege hint cached in the session must not survive a demotion;
    // flip the flag behind the session's back and watch the next request fail
    let id = AuthService::new(&pool)
        .create_admin(&username, "secret-password", true)
        .await
        .expect("create master admin");
    let cookie = login(&app, &username, "secret-password").await;

    sqlx::query("UPDATE admin SET is_master = FALSE WHERE id = $1")
        .bind(id.as_i32())
        .execute(&pool)
        .await
        .expect("demote");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/admins/add")
                .header(header::COOKIE, cookie)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=someone&password=longenough"))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
