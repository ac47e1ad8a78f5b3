use actix_web::{web, HttpResponse};

use crate::dto::auth_dto::PublicKeyResponse;
use crate::handlers::error_handler::handle_domain_error;

use kg_core::errors::DomainError;
use kg_core::repositories::UserRepository;

use super::AppState;

/// Handler for GET /api/v1/auth/key
///
/// Returns the active public key as PEM text so sibling services can verify
/// tokens locally. Only the public half is ever exported.
///
/// ## Errors
/// - 503 Service Unavailable: No keypair has been generated yet
pub async fn public_key<U>(state: web::Data<AppState<U>>) -> HttpResponse
where
    U: UserRepository + 'static,
{
    match state.key_store.public_key_pem() {
        Ok(pem) => HttpResponse::Ok().json(PublicKeyResponse { public_key: pem }),
        Err(error) => handle_domain_error(DomainError::Key(error)),
    }
}
