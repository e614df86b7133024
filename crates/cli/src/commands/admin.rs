//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a regular admin
//! kirana-cli admin create -u neha -p s3cret
//!
//! # Create a master admin
//! kirana-cli admin create -u owner -p s3cret --master
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use secrecy::SecretString;
use thiserror::Error;

use kirana_server::services::auth::{AuthError, AuthService};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Account creation failed.
    #[error("Account error: {0}")]
    Auth(#[from] AuthError),

    /// Empty username.
    #[error("Username must not be empty")]
    EmptyUsername,
}

/// Create a new admin account.
///
/// # Errors
///
/// Returns `AdminCommandError` if the username is empty or taken, the
/// password too short, or the database unreachable.
pub async fn create(username: &str, password: &str, master: bool) -> Result<(), AdminCommandError> {
    dotenvy::dotenv().ok();

    let username = username.trim();
    if username.is_empty() {
        return Err(AdminCommandError::EmptyUsername);
    }

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| AdminCommandError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = kirana_server::db::create_pool(&database_url).await?;

    tracing::info!("Creating admin account: {} (master: {})", username, master);
    let id = AuthService::new(&pool)
        .create_admin(username, password, master)
        .await?;

    tracing::info!("Admin account created! ID: {}, Username: {}", id, username);
    Ok(())
}
