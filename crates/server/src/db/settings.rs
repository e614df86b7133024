//! Shop settings database operations.
//!
//! An open key/value store with three well-known keys seeded at startup:
//! `shop_open_time`, `shop_close_time`, `shop_phone`.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;

use super::RepositoryError;

/// Default values for the well-known settings keys.
pub const DEFAULT_SETTINGS: [(&str, &str); 3] = [
    ("shop_open_time", "08:00"),
    ("shop_close_time", "21:00"),
    ("shop_phone", "9999999999"),
];

/// Shop opening hours and phone, for the storefront header.
#[derive(Debug, Clone, Serialize)]
pub struct ShopTimings {
    pub open_time: String,
    pub close_time: String,
    pub phone: String,
}

/// Repository for shop settings.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a setting value by key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM setting WHERE key = $1")
            .bind(key)
            .fetch_optional(self.pool)
            .await?;
        Ok(value)
    }

    /// Set a setting value, inserting or updating atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO setting (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = $2
            ",
        )
        .bind(key)
        .bind(value)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Get all settings as a key/value map.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all(&self) -> Result<HashMap<String, String>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, String)>("SELECT key, value FROM setting")
            .fetch_all(self.pool)
            .await?;
        Ok(rows.into_iter().collect())
    }

    /// Get the shop timings, falling back to defaults for missing keys.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn shop_timings(&self) -> Result<ShopTimings, RepositoryError> {
        let settings = self.all().await?;
        let value = |key: &str, default: &str| {
            settings
                .get(key)
                .cloned()
                .unwrap_or_else(|| default.to_owned())
        };

        Ok(ShopTimings {
            open_time: value("shop_open_time", "08:00"),
            close_time: value("shop_close_time", "21:00"),
            phone: value("shop_phone", "9999999999"),
        })
    }

    /// Seed the well-known keys if absent. Existing values are left alone;
    /// `ON CONFLICT DO NOTHING` keeps concurrent seeding race-free.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if an insert fails.
    pub async fn seed_defaults(&self) -> Result<(), RepositoryError> {
        for (key, value) in DEFAULT_SETTINGS {
            sqlx::query("INSERT INTO setting (key, value) VALUES ($1, $2) ON CONFLICT DO NOTHING")
                .bind(key)
                .bind(value)
                .execute(self.pool)
                .await?;
        }
        Ok(())
    }
}
