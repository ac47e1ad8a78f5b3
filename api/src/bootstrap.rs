//! Startup sequence: keypair, seed admin, key announcement
//!
//! Runs once before the HTTP server binds, so every request observes a
//! ready keypair and at least one admin account exists for the gated
//! endpoints.

use kg_core::domain::entities::user::ADMIN_ROLE;
use kg_core::errors::{AuthError, DomainError, DomainResult};
use kg_core::repositories::UserRepository;
use kg_core::services::auth::AuthService;
use kg_core::services::keys::KeyStore;
use kg_core::services::rotation::RotationService;

use crate::config::ApiConfig;

/// Prepare the service for traffic
///
/// Generates the initial keypair, seeds the admin account if missing, and
/// announces the public key on the fanout exchange. A failed announcement is
/// logged but does not abort startup; subscribers can still pull the key
/// over HTTP.
pub async fn initialize<U>(
    key_store: &KeyStore,
    auth_service: &AuthService<U>,
    rotation_service: &RotationService,
    config: &ApiConfig,
) -> DomainResult<()>
where
    U: UserRepository,
{
    key_store.ensure_keypair(config.keypair.exponent, config.keypair.bits)?;

    seed_admin(auth_service, config).await?;

    let outcome = rotation_service.announce().await?;
    if !outcome.broadcast.is_delivered() {
        log::warn!("Public key announcement failed; subscribers must fetch it over HTTP");
    }

    Ok(())
}

/// Create the seed admin account unless one already exists
async fn seed_admin<U>(auth_service: &AuthService<U>, config: &ApiConfig) -> DomainResult<()>
where
    U: UserRepository,
{
    match auth_service
        .register(&config.admin_username, &config.admin_password, ADMIN_ROLE)
        .await
    {
        Ok(user) => {
            log::info!("Seeded admin account {}", user.username);
            Ok(())
        }
        Err(DomainError::Auth(AuthError::UserAlreadyExists)) => {
            log::debug!("Admin account already present, skipping seed");
            Ok(())
        }
        Err(error) => Err(error),
    }
}
