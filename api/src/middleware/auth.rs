//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the bearer token from the Authorization header, verifies it as
//! an access token against the current public key, and injects an
//! [`AuthContext`] into request extensions for handlers to consume.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use kg_core::domain::entities::token::{Claims, TokenKind};
use kg_core::domain::entities::user::ADMIN_ROLE;
use kg_core::errors::{DomainError, DomainResult, TokenError};
use kg_core::services::token::TokenService;

use crate::handlers::error_handler::handle_domain_error;

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: Uuid,
    /// Role carried by the access token
    pub role: String,
}

impl AuthContext {
    /// Creates a new authentication context from verified access claims
    pub fn from_claims(claims: &Claims) -> DomainResult<Self> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::Malformed))?;
        let role = claims
            .role
            .clone()
            .ok_or(DomainError::Token(TokenError::Malformed))?;

        Ok(Self { user_id, role })
    }

    /// Whether this context belongs to an admin
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// Pulls the context a [`JwtAuth`]-wrapped route injected earlier
    pub fn from_request(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<AuthContext>().cloned()
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    /// Creates middleware verifying against the given token service
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    let response = handle_domain_error(DomainError::Token(TokenError::Malformed));
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            let context = token_service
                .verify_token(&token, TokenKind::Access)
                .and_then(|claims| AuthContext::from_claims(&claims));

            match context {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(error) => {
                    let response = handle_domain_error(error);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}
