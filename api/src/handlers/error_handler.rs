//! Maps domain errors onto HTTP status codes and response bodies.
//!
//! Credential failures deliberately collapse into one generic 401 body:
//! a caller must not be able to tell an unknown username from a wrong
//! password or a suspended account. The distinction lives in server logs.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use validator::ValidationErrors;

use kg_core::errors::{AuthError, DomainError, KeyError, TokenError};

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    log::error!("Domain Error: {:?}", error);

    let (status, response) = match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials
            | AuthError::AccountDisabled
            | AuthError::UserNotFound => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("invalid_credentials", "Invalid username or password"),
            ),
            AuthError::UserAlreadyExists => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(
                    "user_already_exists",
                    "A user with this username already exists",
                ),
            ),
            AuthError::InsufficientPermissions => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new(
                    "insufficient_permissions",
                    "This operation requires the admin role",
                ),
            ),
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("token_expired", "Token has expired"),
            ),
            TokenError::InvalidTokenType { .. }
            | TokenError::InvalidSignature
            | TokenError::Malformed => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("invalid_token", "Token is invalid"),
            ),
            TokenError::TokenGenerationFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("token_generation_failed", "Failed to generate token"),
            ),
        },
        DomainError::Key(key_error) => match key_error {
            KeyError::NotInitialized => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new("keys_unavailable", "Signing keys are not available yet"),
            ),
            KeyError::GenerationFailed { .. } | KeyError::EncodingFailed { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("key_generation_failed", "Failed to generate signing keys"),
            ),
        },
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("validation_error", message),
        ),
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new("not_found", format!("{} not found", resource)),
        ),
        // Internal details never reach the client.
        DomainError::Database { .. }
        | DomainError::Internal { .. }
        | DomainError::Notify(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("internal_error", "An internal error occurred"),
        ),
    };

    response.to_response(status)
}

/// Convert request body validation failures into a 400 response
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();

    ErrorResponse::new(
        "validation_error",
        format!("Invalid request fields: {}", fields.join(", ")),
    )
    .to_response(StatusCode::BAD_REQUEST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::Value;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                handle_domain_error(DomainError::Auth(AuthError::InvalidCredentials)),
                StatusCode::UNAUTHORIZED,
            ),
            (
                handle_domain_error(DomainError::Auth(AuthError::AccountDisabled)),
                StatusCode::UNAUTHORIZED,
            ),
            (
                handle_domain_error(DomainError::Auth(AuthError::UserNotFound)),
                StatusCode::UNAUTHORIZED,
            ),
            (
                handle_domain_error(DomainError::Auth(AuthError::UserAlreadyExists)),
                StatusCode::BAD_REQUEST,
            ),
            (
                handle_domain_error(DomainError::Auth(AuthError::InsufficientPermissions)),
                StatusCode::FORBIDDEN,
            ),
            (
                handle_domain_error(DomainError::Token(TokenError::TokenExpired)),
                StatusCode::UNAUTHORIZED,
            ),
            (
                handle_domain_error(DomainError::Key(KeyError::NotInitialized)),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                handle_domain_error(DomainError::Database {
                    message: "connection refused".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (response, expected) in cases {
            assert_eq!(response.status(), expected);
        }
    }

    #[actix_web::test]
    async fn test_credential_failures_share_one_body() {
        // Every credential sub-reason must produce the identical envelope.
        for error in [
            DomainError::Auth(AuthError::InvalidCredentials),
            DomainError::Auth(AuthError::AccountDisabled),
            DomainError::Auth(AuthError::UserNotFound),
        ] {
            let response = handle_domain_error(error);
            let bytes = to_bytes(response.into_body()).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();

            assert_eq!(body["error"], "invalid_credentials");
            assert_eq!(body["message"], "Invalid username or password");
        }
    }

    #[actix_web::test]
    async fn test_internal_detail_is_not_leaked() {
        let response = handle_domain_error(DomainError::Internal {
            message: "bcrypt cost out of range".to_string(),
        });
        let bytes = to_bytes(response.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"], "internal_error");
        assert!(!body["message"].as_str().unwrap().contains("bcrypt"));
    }
}
