use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, TokenResponse};
use crate::handlers::error_handler::{handle_domain_error, handle_validation_errors};

use kg_core::repositories::UserRepository;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Verifies a username/password pair and returns a token pair.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "admin@example.com",
///     "password": "secret"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "bearer",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed request body
/// - 401 Unauthorized: Wrong credentials or disabled account (indistinguishable)
/// - 503 Service Unavailable: Signing keys not ready yet
pub async fn login<U>(
    state: web::Data<AppState<U>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        return handle_validation_errors(errors);
    }

    let identity = match state
        .auth_service
        .authenticate(&request.username, &request.password)
        .await
    {
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
