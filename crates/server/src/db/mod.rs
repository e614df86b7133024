//! Database operations for the shop `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `product` - Catalog products
//! - `orders` - Customer orders (items snapshot as JSONB)
//! - `admin` - Admin accounts (argon2 password hashes)
//! - `customer_care` - Customer care issues
//! - `contact_message` - Contact-form messages
//! - `setting` - Shop-wide key/value settings
//! - `session` - Admin session storage (tower-sessions)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/`. The server runs
//! them at startup; they can also be run without starting the server via:
//! ```bash
//! cargo run -p kirana-cli -- migrate
//! ```
//!
//! All queries use the runtime `query_as`/`query_scalar` API so the crate
//! compiles without a live database or an SQLx offline cache.

pub mod admins;
pub mod contact_messages;
pub mod customer_care;
pub mod orders;
pub mod products;
pub mod settings;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admins::AdminRepository;
pub use contact_messages::ContactMessageRepository;
pub use customer_care::CustomerCareRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use settings::SettingsRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the schema migrations for this crate.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
