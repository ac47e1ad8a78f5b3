//! Domain-specific error types for key, token, authentication, and
//! notification operations.
//!
//! These enums enumerate the failure taxonomy; HTTP status codes and
//! machine-readable error codes are assigned in the presentation layer.

use thiserror::Error;

/// Keypair lifecycle errors
#[derive(Error, Debug)]
pub enum KeyError {
    /// No keypair has been generated yet; callers should retry after
    /// initialization.
    #[error("Signing keypair not initialized")]
    NotInitialized,

    /// RSA generation failed (e.g. entropy exhaustion). The previously active
    /// keypair, if any, remains untouched.
    #[error("Keypair generation failed: {message}")]
    GenerationFailed { message: String },

    /// A generated key could not be encoded into PEM or loaded for signing
    #[error("Key encoding failed: {message}")]
    EncodingFailed { message: String },
}

/// Token issuance and verification errors
///
/// All verification variants map to "unauthorized" at the boundary; the caller
/// recovers by re-logging-in or refreshing, never by retry.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token type: expected {expected}, got {actual}")]
    InvalidTokenType { expected: String, actual: String },

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Malformed token")]
    Malformed,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Credential verification errors
///
/// `InvalidCredentials`, `AccountDisabled`, and `UserNotFound` must all be
/// rendered as the same generic response so callers cannot enumerate valid
/// usernames or account states. Internal logs keep them distinct.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account disabled")]
    AccountDisabled,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Notification channel errors
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The broker rejected or never received the message. For rotation this is
    /// terminal-but-recoverable: the new key is already authoritative and only
    /// the broadcast needs retry.
    #[error("Broadcast failed: {message}")]
    BroadcastFailed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_messages() {
        let error = TokenError::InvalidTokenType {
            expected: "access".to_string(),
            actual: "refresh".to_string(),
        };
        let message = error.to_string();

        assert!(message.contains("expected access"));
        assert!(message.contains("got refresh"));
    }

    #[test]
    fn test_credential_errors_share_no_detail() {
        // The display text of the generic variant must not leak which
        // sub-reason occurred.
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_key_error_generation_failed() {
        let error = KeyError::GenerationFailed {
            message: "rng failure".to_string(),
        };
        assert!(error.to_string().contains("rng failure"));
    }
}
