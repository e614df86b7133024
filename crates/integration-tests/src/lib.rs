//! Integration tests for Kirana Store.
//!
//! The tests in `tests/` talk to a real `PostgreSQL` database through the
//! server's repositories and services, and are `#[ignore]`-gated so the
//! default test run stays database-free.
//!
//! # Running Tests
//!
//! ```bash
//! # Point DATABASE_URL at a disposable database, run migrations
//! export DATABASE_URL=postgres://localhost/kirana_test
//! cargo run -p kirana-cli -- migrate
//!
//! # Run the ignored integration tests
//! cargo test -p kirana-integration-tests -- --ignored
//! ```

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use secrecy::SecretString;
use sqlx::PgPool;

/// Connect to the test database named by `DATABASE_URL` and ensure the
/// schema is current.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the database is unreachable; the
/// callers are `#[ignore]`-gated tests that require one.
pub async fn test_pool() -> PgPool {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .expect("DATABASE_URL must be set for integration tests");

    let pool = kirana_server::db::create_pool(&url)
        .await
        .expect("Failed to connect to test database");
    kirana_server::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Build the full application router over the test database, session layer
/// included, for `tower::ServiceExt::oneshot`-style request tests.
///
/// # Panics
///
/// Panics if the session store migration fails.
pub async fn test_app(pool: &PgPool) -> axum::Router {
    let config = kirana_server::config::ServerConfig {
        database_url: SecretString::from(
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
        ),
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
        port: 0,
        admin_username: "admin".to_owned(),
        admin_password: None,
        sentry_dsn: None,
        sentry_environment: None,
    };

    let session_layer = kirana_server::middleware::create_session_layer(pool)
        .await
        .expect("Failed to create session store");
    let state = kirana_server::state::AppState::new(config, pool.clone());

    axum::Router::new()
        .merge(kirana_server::routes::routes())
        .layer(session_layer)
        .with_state(state)
}

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Unique suffix for per-test usernames and emails, so parallel tests never
/// collide on unique indexes.
#[must_use]
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{nanos}-{n}", std::process::id())
}
