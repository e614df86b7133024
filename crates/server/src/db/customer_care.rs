//! Customer care issue repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use kirana_core::IssueId;

use super::RepositoryError;
use crate::models::CustomerCareIssue;

/// Internal row type for customer care queries.
#[derive(Debug, sqlx::FromRow)]
struct IssueRow {
    id: i32,
    name: String,
    email: String,
    phone: String,
    order_id: Option<String>,
    issue_type: String,
    description: String,
    priority: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    admin_response: Option<String>,
    resolved_at: Option<DateTime<Utc>>,
}

impl From<IssueRow> for CustomerCareIssue {
    fn from(row: IssueRow) -> Self {
        Self {
            id: IssueId::new(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            order_id: row.order_id,
            issue_type: row.issue_type,
            description: row.description,
            priority: row.priority,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            admin_response: row.admin_response,
            resolved_at: row.resolved_at,
        }
    }
}

const ISSUE_COLUMNS: &str = "id, name, email, phone, order_id, issue_type, description, \
     priority, status, created_at, updated_at, admin_response, resolved_at";

/// Parameters for reporting a new issue.
#[derive(Debug)]
pub struct NewIssue {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Loose order reference; not validated against the order ledger.
    pub order_id: Option<String>,
    pub issue_type: String,
    pub description: String,
    pub priority: String,
}

/// Repository for customer care database operations.
pub struct CustomerCareRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerCareRepository<'a> {
    /// Create a new customer care repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new issue with status `open` and return its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, issue: NewIssue) -> Result<IssueId, RepositoryError> {
        let id = sqlx::query_scalar::<_, i32>(
            r"
            INSERT INTO customer_care
                (name, email, phone, order_id, issue_type, description, priority)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            ",
        )
        .bind(&issue.name)
        .bind(&issue.email)
        .bind(&issue.phone)
        .bind(&issue.order_id)
        .bind(&issue.issue_type)
        .bind(&issue.description)
        .bind(&issue.priority)
        .fetch_one(self.pool)
        .await?;

        Ok(IssueId::new(id))
    }

    /// List all issues, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<CustomerCareIssue>, RepositoryError> {
        let rows = sqlx::query_as::<_, IssueRow>(&format!(
            "SELECT {ISSUE_COLUMNS} FROM customer_care ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List issues with a given status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_status(
        &self,
        status: &str,
    ) -> Result<Vec<CustomerCareIssue>, RepositoryError> {
        let rows = sqlx::query_as::<_, IssueRow>(&format!(
            "SELECT {ISSUE_COLUMNS} FROM customer_care WHERE status = $1 ORDER BY created_at DESC"
        ))
        .bind(status)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List issues with a given priority, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_priority(
        &self,
        priority: &str,
    ) -> Result<Vec<CustomerCareIssue>, RepositoryError> {
        let rows = sqlx::query_as::<_, IssueRow>(&format!(
            "SELECT {ISSUE_COLUMNS} FROM customer_care WHERE priority = $1 ORDER BY created_at DESC"
        ))
        .bind(priority)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an issue by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: IssueId,
    ) -> Result<Option<CustomerCareIssue>, RepositoryError> {
        let row = sqlx::query_as::<_, IssueRow>(&format!(
            "SELECT {ISSUE_COLUMNS} FROM customer_care WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Record an admin response and status change.
    ///
    /// `resolved_at` is stamped exactly when the new status is `resolved` and
    /// is never cleared afterwards; `updated_at` is always refreshed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the issue does not exist.
    pub async fn respond(
        &self,
        id: IssueId,
        response: &str,
        status: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE customer_care
            SET admin_response = $1,
                status = $2,
                resolved_at = CASE WHEN $2 = 'resolved' THEN NOW() ELSE resolved_at END,
                updated_at = NOW()
            WHERE id = $3
            ",
        )
        .bind(response)
        .bind(status)
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Hard-delete an issue.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the issue does not exist.
    pub async fn delete(&self, id: IssueId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM customer_care WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Number of issues still open.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn open_count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM customer_care WHERE status = 'open'",
        )
        .fetch_one(self.pool)
        .await?;
        Ok(count)
    }
}
