use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth_dto::RotateResponse;
use crate::handlers::error_handler::handle_domain_error;
use crate::middleware::AuthContext;

use kg_core::errors::{AuthError, DomainError};
use kg_core::repositories::UserRepository;

use super::AppState;

/// Handler for POST /api/v1/auth/rotate
///
/// Replaces the signing keypair and broadcasts the new public key. The swap
/// is authoritative the moment it happens: a failed broadcast still returns
/// 200, with `broadcast: false` and the failure reason, because the new key
/// is already in effect and only the announcement needs retrying.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 403 Forbidden: Caller is not an admin
/// - 500 Internal Server Error: Keypair generation failed (old key stays active)
pub async fn rotate<U>(req: HttpRequest, state: web::Data<AppState<U>>) -> HttpResponse
where
    U: UserRepository + 'static,
{
    let context = match AuthContext::from_request(&req) {
        Some(context) => context,
        None => {
            return handle_domain_error(DomainError::Auth(AuthError::InsufficientPermissions))
        }
    };
    if !context.is_admin() {
        return handle_domain_error(DomainError::Auth(AuthError::InsufficientPermissions));
    }

    match state.rotation_service.rotate().await {
        Ok(outcome) => HttpResponse::Ok().json(RotateResponse::from(outcome)),
        Err(error) => handle_domain_error(error),
    }
}
