//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during admin authentication and management.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password or unknown username. The two cases are deliberately
    /// indistinguishable to avoid username enumeration.
    #[error("गलत यूजरनेम या पासवर्ड (Invalid credentials)")]
    InvalidCredentials,

    /// Username already taken.
    #[error("यह यूजरनेम पहले से मौजूद है (Username already exists)")]
    DuplicateUsername,

    /// Master admins can never be deleted, regardless of caller.
    #[error("Master Admin को डिलीट नहीं किया जा सकता (Cannot delete Master Admin)")]
    CannotDeleteMaster,

    /// Admin not found.
    #[error("admin not found")]
    NotFound,

    /// Password too weak.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
