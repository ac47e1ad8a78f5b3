//! Password hashing helpers built on bcrypt

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::{DomainError, DomainResult};

/// Hashes a plaintext password for storage
pub fn hash_password(password: &str) -> DomainResult<String> {
    hash(password, DEFAULT_COST).map_err(|e| DomainError::Internal {
        message: format!("Password hashing failed: {e}"),
    })
}

/// Checks a plaintext password against a stored hash
///
/// A hash that cannot be parsed counts as a mismatch rather than an error, so
/// a corrupted row behaves like a wrong password instead of a 500.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    verify(password, password_hash).unwrap_or(false)
}
