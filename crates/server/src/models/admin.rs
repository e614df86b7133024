//! Admin account domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use kirana_core::AdminId;

/// An admin account.
///
/// The password hash deliberately lives outside this type; repositories
/// return it separately to the auth service so it never leaks into
/// serialized responses.
#[derive(Debug, Clone, Serialize)]
pub struct Admin {
    /// Unique admin ID.
    pub id: AdminId,
    /// Login username, unique across admins.
    pub username: String,
    /// Master admins manage other admin accounts and can never be deleted.
    pub is_master: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
