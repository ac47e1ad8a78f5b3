//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Default refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Scheme reported to clients alongside the token pair
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// The two kinds of token the service issues
///
/// The kind is embedded in the `type` claim and checked on verification so a
/// refresh token can never be replayed where an access token is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Short-lived, carries identity and role
    Access,
    /// Long-lived, carries identity only
    Refresh,
}

impl TokenKind {
    /// Value of the `type` claim for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for the JWT payload
///
/// Refresh tokens deliberately carry no `role` claim: each refresh must
/// re-resolve the principal's current role from the user repository, so a
/// stale refresh token cannot mint tokens for a role the user no longer holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID, string-encoded)
    pub sub: String,

    /// Role claim, present only on access tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Token kind: "access" or "refresh"
    #[serde(rename = "type")]
    pub token_type: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for an access token expiring after `ttl_minutes`
    pub fn new_access_token(user_id: Uuid, role: impl Into<String>, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::minutes(ttl_minutes);

        Self {
            sub: user_id.to_string(),
            role: Some(role.into()),
            token_type: TokenKind::Access.as_str().to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Creates claims for a refresh token expiring after `ttl_days`
    pub fn new_refresh_token(user_id: Uuid, ttl_days: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::days(ttl_days);

        Self {
            sub: user_id.to_string(),
            role: None,
            token_type: TokenKind::Refresh.as_str().to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Whether the claims have expired
    ///
    /// A token is expired once the current Unix second is strictly greater
    /// than `exp`; verification applies the same boundary with zero leeway.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Whether the `type` claim matches `kind`
    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.token_type == kind.as_str()
    }

    /// Parses the subject back into a user ID
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Token pair returned to the client after login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Always "bearer"
    pub token_type: String,

    /// Access token expiry time in seconds
    pub expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
        }
    }
}
