use actix_web::{web, HttpResponse};

use crate::dto::auth_dto::{RefreshTokenRequest, TokenResponse};
use crate::handlers::error_handler::handle_domain_error;

use kg_core::domain::entities::TokenKind;
use kg_core::errors::{DomainError, TokenError};
use kg_core::repositories::UserRepository;

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a valid refresh token for a fresh token pair. The role embedded
/// in the new access token comes from the user repository, not from the
/// presented token, so role changes take effect on the next refresh.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Expired, malformed, or wrong-kind token; suspended or
///   deleted account
/// - 503 Service Unavailable: Signing keys not ready yet
pub async fn refresh<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    let claims = match state
        .token_service
        .verify_token(&request.refresh_token, TokenKind::Refresh)
    {
        Ok(claims) => claims,
        Err(error) => return handle_domain_error(error),
    };

    let user_id = match claims.user_id() {
        Ok(user_id) => user_id,
        Err(_) => return handle_domain_error(DomainError::Token(TokenError::Malformed)),
    };

    let identity = match state.auth_service.resolve(user_id).await {
        Ok(identity) => identity,
        Err(error) => return handle_domain_error(error),
    };

    match state
        .token_service
        .issue_token_pair(identity.user_id, &identity.role)
    {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
