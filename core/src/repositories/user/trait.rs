//! User repository trait defining the interface for principal persistence.
//!
//! The trait is async-first and returns `Result` for proper error handling.
//! Implementations live in the infrastructure layer; the core only consumes
//! the contract.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{User, UserStatus};
use crate::errors::DomainError;

/// Repository contract for User persistence
///
/// Any persistence technology qualifies; the core treats this as an opaque
/// dependency and never holds the key-store lock across these calls.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their login name
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that name
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate username)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Change a user's lifecycle status
    ///
    /// # Returns
    /// * `Ok(true)` - Status updated
    /// * `Ok(false)` - User not found
    async fn update_status(&self, id: Uuid, status: UserStatus) -> Result<bool, DomainError>;

    /// Whether a user exists with the given login name
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError>;
}
