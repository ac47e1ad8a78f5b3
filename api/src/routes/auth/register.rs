use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{RegisterRequest, UserResponse};
use crate::handlers::error_handler::{handle_domain_error, handle_validation_errors};
use crate::middleware::AuthContext;

use kg_core::errors::{AuthError, DomainError};
use kg_core::repositories::UserRepository;

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates a new user. Requires a valid access token carrying the admin
/// role; the route is wrapped by the JWT middleware, so this handler only
/// enforces the role.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "client@example.com",
///     "password": "Passw0rd!",
///     "role": "client"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed body or username already taken
/// - 401 Unauthorized: Missing or invalid access token
/// - 403 Forbidden: Caller is not an admin
pub async fn register<U>(
    req: HttpRequest,
    state: web::Data<AppState<U>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
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

    if let Err(errors) = request.0.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .auth_service
        .register(&request.username, &request.password, &request.role)
        .await
    {
        Ok(user) => HttpResponse::Created().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(error),
    }
}
