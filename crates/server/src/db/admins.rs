//! Admin account repository for database operations.
//!
//! Privilege rules (master-only mutation, self-delete rejection) live in
//! `services::auth` and the admin routes; this module only talks to the
//! `admin` table. The unique index on `username` is the atomic guard
//! against concurrent duplicate creation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use kirana_core::AdminId;

use super::RepositoryError;
use crate::models::Admin;

/// Internal row type for admin queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: i32,
    username: String,
    is_master: bool,
    created_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Self {
            id: AdminId::new(row.id),
            username: row.username,
            is_master: row.is_master,
            created_at: row.created_at,
        }
    }
}

/// Repository for admin account database operations.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all admins, masters first, then by creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Admin>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminRow>(
            r"
            SELECT id, username, is_master, created_at
            FROM admin
            ORDER BY is_master DESC, id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an admin by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            "SELECT id, username, is_master, created_at FROM admin WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Get an admin and their password hash by exact username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_auth_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(Admin, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, (i32, String, bool, DateTime<Utc>, String)>(
            r"
            SELECT id, username, is_master, created_at, password_hash
            FROM admin
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(id, username, is_master, created_at, hash)| {
            (
                Admin {
                    id: AdminId::new(id),
                    username,
                    is_master,
                    created_at,
                },
                hash,
            )
        }))
    }

    /// Create a new admin with a pre-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        is_master: bool,
    ) -> Result<AdminId, RepositoryError> {
        let id = sqlx::query_scalar::<_, i32>(
            r"
            INSERT INTO admin (username, password_hash, is_master)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(username)
        .bind(password_hash)
        .bind(is_master)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(AdminId::new(id))
    }

    /// Check whether an admin holds master privilege.
    ///
    /// Returns `false` for unknown IDs, matching the source behavior where a
    /// stale session simply loses privilege.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn is_master(&self, id: AdminId) -> Result<bool, RepositoryError> {
        let is_master =
            sqlx::query_scalar::<_, bool>("SELECT is_master FROM admin WHERE id = $1")
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        Ok(is_master.unwrap_or(false))
    }

    /// Hard-delete an admin row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the admin does not exist.
    pub async fn delete(&self, id: AdminId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM admin WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Total number of admins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admin")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
