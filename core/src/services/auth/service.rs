//! Credential verification, registration, and identity resolution

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::value_objects::VerifiedIdentity;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;

use super::password::{hash_password, verify_password};

/// Service verifying credentials against the user repository
///
/// Unknown usernames and wrong passwords both surface as
/// `AuthError::InvalidCredentials`; the distinction exists only in debug logs.
pub struct AuthService<U: UserRepository> {
    users: Arc<U>,
}

impl<U: UserRepository> AuthService<U> {
    /// Creates a new auth service over the given repository
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Verifies a username/password pair
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` - unknown username or wrong password
    /// * `AuthError::AccountDisabled` - credentials valid but account suspended
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> DomainResult<VerifiedIdentity> {
        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => {
                tracing::debug!(username = %username, "Login attempt for unknown username");
                return Err(DomainError::Auth(AuthError::InvalidCredentials));
            }
        };

        if !verify_password(password, &user.password_hash) {
            tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        if !user.is_active() {
            tracing::warn!(user_id = %user.id, "Login attempt on suspended account");
            return Err(DomainError::Auth(AuthError::AccountDisabled));
        }

        Ok(VerifiedIdentity::new(user.id, user.role))
    }

    /// Registers a new user with the given role
    ///
    /// The caller is responsible for admin gating; this method only enforces
    /// username uniqueness.
    ///
    /// # Errors
    ///
    /// * `AuthError::UserAlreadyExists` - username is taken
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> DomainResult<User> {
        if self.users.exists_by_username(username).await? {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        let password_hash = hash_password(password)?;
        let user = self.users.create(User::new(username, role, password_hash)).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "Registered new user");
        Ok(user)
    }

    /// Resolves the current identity for a user ID
    ///
    /// Used on refresh: the role comes from the repository, never from the
    /// refresh token, and a suspended account cannot refresh.
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - the user no longer exists
    /// * `AuthError::AccountDisabled` - the account is suspended
    pub async fn resolve(&self, user_id: Uuid) -> DomainResult<VerifiedIdentity> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        if !user.is_active() {
            return Err(DomainError::Auth(AuthError::AccountDisabled));
        }

        Ok(VerifiedIdentity::new(user.id, user.role))
    }
}
