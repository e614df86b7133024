//! Seed sample products into an empty catalog.
//!
//! # Usage
//!
//! ```bash
//! kirana-cli seed
//! ```
//!
//! A non-empty catalog is left untouched, so the command is safe to run on
//! every deploy.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

use kirana_server::db::{ProductRepository, RepositoryError};

/// Sample catalog for a fresh shop.
const SAMPLE_PRODUCTS: [(&str, u32); 12] = [
    ("चावल (Rice) - 1kg", 60),
    ("गेहूं आटा (Wheat Flour) - 1kg", 45),
    ("चीनी (Sugar) - 1kg", 50),
    ("नमक (Salt) - 1kg", 25),
    ("सरसों तेल (Mustard Oil) - 1L", 180),
    ("दाल (Toor Dal) - 1kg", 140),
    ("चाय पत्ती (Tea) - 250g", 80),
    ("हल्दी (Turmeric) - 100g", 35),
    ("मिर्च पाउडर (Chili Powder) - 100g", 40),
    ("धनिया पाउडर (Coriander) - 100g", 30),
    ("साबुन (Soap)", 35),
    ("शैम्पू (Shampoo)", 120),
];

/// Errors that can occur during seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Seed the sample products if the catalog is empty.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = kirana_server::db::create_pool(&database_url).await?;
    let products = ProductRepository::new(&pool);

    if products.count().await? > 0 {
        tracing::info!("Catalog is not empty, skipping seed");
        return Ok(());
    }

    for (name, price) in SAMPLE_PRODUCTS {
        products
            .create(name, Decimal::from(price), "default.png")
            .await?;
    }

    tracing::info!("Added {} sample products", SAMPLE_PRODUCTS.len());
    Ok(())
}
