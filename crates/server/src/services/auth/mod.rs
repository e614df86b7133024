//! Admin authentication and account management service.
//!
//! Passwords are hashed with argon2. Callers (the admin routes) are
//! responsible for the session-level checks — master-only gating and
//! self-delete rejection — before invoking mutations here; this service
//! enforces the rules that hold regardless of caller.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use kirana_core::AdminId;

use crate::db::{AdminRepository, RepositoryError};
use crate::models::Admin;

/// Minimum password length for new admin accounts.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Admin authentication service.
pub struct AuthService<'a> {
    admins: AdminRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            admins: AdminRepository::new(pool),
        }
    }

    /// Authenticate an admin by username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for both an unknown username
    /// and a wrong password.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Admin, AuthError> {
        let (admin, password_hash) = self
            .admins
            .get_auth_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(admin)
    }

    /// Create a new admin account.
    ///
    /// The caller must already have verified that the requesting session
    /// holds master privilege.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the password is shorter than six
    /// characters, and `AuthError::DuplicateUsername` if the username is
    /// taken (enforced by the unique index, so concurrent creation is safe).
    pub async fn create_admin(
        &self,
        username: &str,
        password: &str,
        is_master: bool,
    ) -> Result<AdminId, AuthError> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let password_hash = hash_password(password)?;

        let id = self
            .admins
            .create(username, &password_hash, is_master)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::DuplicateUsername,
                other => AuthError::Repository(other),
            })?;

        Ok(id)
    }

    /// Delete an admin account.
    ///
    /// Master accounts are never deletable through this path, regardless of
    /// who asks. Self-delete rejection is the route's responsibility.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotFound` if the admin does not exist and
    /// `AuthError::CannotDeleteMaster` if the target is a master.
    pub async fn delete_admin(&self, id: AdminId) -> Result<(), AuthError> {
        let admin = self.admins.get_by_id(id).await?.ok_or(AuthError::NotFound)?;

        if admin.is_master {
            return Err(AuthError::CannotDeleteMaster);
        }

        self.admins.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound => AuthError::NotFound,
            other => AuthError::Repository(other),
        })
    }

    /// Check whether an admin holds master privilege.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn is_master(&self, id: AdminId) -> Result<bool, AuthError> {
        Ok(self.admins.is_master(id).await?)
    }
}

/// Hash a password with argon2 and a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on mismatch or an unparseable
/// stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("secret-password").expect("hash");
        assert!(verify_password("secret-password", &hash).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("secret-password").expect("hash");
        assert!(matches!(
            verify_password("wrong-password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same").expect("hash");
        let b = hash_password("same").expect("hash");
        assert_ne!(a, b);
    }
}
