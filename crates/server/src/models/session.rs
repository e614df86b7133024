//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use kirana_core::AdminId;

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin.
/// The `is_master` flag here is a hint for responses only; privileged
/// operations re-check the flag against the database on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's database ID.
    pub id: AdminId,
    /// Admin's username.
    pub username: String,
    /// Whether the admin held master privilege at login.
    pub is_master: bool,
}

/// Session keys for admin authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
