//! User entity representing an authenticatable principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role string that unlocks the privileged endpoints (register, rotate)
pub const ADMIN_ROLE: &str = "admin";

/// Lifecycle status of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Account may authenticate
    Active,
    /// Account is locked out, e.g. after a compromise notice
    Suspended,
}

impl UserStatus {
    /// String form used for persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
        }
    }

    /// Parse the persisted string form; unknown values are treated as suspended
    /// so a corrupted row can never authenticate.
    pub fn parse(value: &str) -> Self {
        match value {
            "active" => UserStatus::Active,
            _ => UserStatus::Suspended,
        }
    }
}

/// A registered principal
///
/// The core only reads `id` and `role` to embed in tokens; everything else is
/// owned by the surrounding user-management layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Login name, unique across the service
    pub username: String,

    /// Role claim embedded in access tokens
    pub role: String,

    /// bcrypt hash of the password
    pub password_hash: String,

    /// Lifecycle status
    pub status: UserStatus,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user
    pub fn new(
        username: impl Into<String>,
        role: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            role: role.into(),
            password_hash: password_hash.into(),
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the account may authenticate
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Whether the role grants access to privileged endpoints
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// Locks the account out
    pub fn suspend(&mut self) {
        self.status = UserStatus::Suspended;
        self.updated_at = Utc::now();
    }

    /// Restores a suspended account
    pub fn reinstate(&mut self) {
        self.status = UserStatus::Active;
        self.updated_at = Utc::now();
    }
}
