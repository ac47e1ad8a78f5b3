//! Authentication route handlers
//!
//! Endpoints:
//! - Login and token refresh
//! - Admin-gated registration and key rotation
//! - Public key export and health

pub mod health;
pub mod login;
pub mod public_key;
pub mod refresh;
pub mod register;
pub mod rotate;

use std::sync::Arc;

use kg_core::repositories::UserRepository;
use kg_core::services::auth::AuthService;
use kg_core::services::keys::KeyStore;
use kg_core::services::rotation::RotationService;
use kg_core::services::token::TokenService;

/// Application state that holds shared services
pub struct AppState<U>
where
    U: UserRepository,
{
    pub auth_service: Arc<AuthService<U>>,
    pub token_service: Arc<TokenService>,
    pub rotation_service: Arc<RotationService>,
    pub key_store: Arc<KeyStore>,
}
