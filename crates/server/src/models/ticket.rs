//! Ticket domain types: customer care issues and contact messages.
//!
//! Both follow the same lifecycle: customer report, optional admin
//! response/reply, read/resolve marking, optional hard delete.

use chrono::{DateTime, Utc};
use serde::Serialize;

use kirana_core::{IssueId, MessageId};

/// A customer care issue reported through the storefront.
///
/// `priority`, `issue_type`, and `status` are open strings; only
/// `open`/`resolved` are distinguished in queries.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerCareIssue {
    pub id: IssueId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Loose order reference supplied by the customer; not a foreign key.
    pub order_id: Option<String>,
    pub issue_type: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// Touched on every mutation.
    pub updated_at: DateTime<Utc>,
    pub admin_response: Option<String>,
    /// Stamped when the status transitions to `resolved`; never cleared.
    pub resolved_at: Option<DateTime<Utc>>,
}

/// A contact-form message.
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub message: String,
    /// Set by an explicit admin view or implicitly by replying;
    /// never reset to unread.
    pub is_read: bool,
    pub admin_reply: Option<String>,
    pub created_at: DateTime<Utc>,
}
