use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use log::info;

use kg_api::app::create_app;
use kg_api::bootstrap;
use kg_api::config::ApiConfig;
use kg_api::routes::auth::AppState;

use kg_core::services::auth::AuthService;
use kg_core::services::keys::KeyStore;
use kg_core::services::rotation::{RotationConfig, RotationService};
use kg_core::services::token::{TokenService, TokenServiceConfig};
use kg_infra::database::{create_pool, MySqlUserRepository};
use kg_infra::messaging::{RabbitNotificationChannel, SuspensionListener};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Keygate API Server");

    let config = ApiConfig::from_env();
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    // Infrastructure
    let pool = create_pool(&config.database)
        .await
        .context("database connection failed")?;
    let users = Arc::new(MySqlUserRepository::new(pool));
    let channel = Arc::new(RabbitNotificationChannel::new(&config.messaging));

    // Core services
    let key_store = Arc::new(KeyStore::new());
    let token_service = Arc::new(TokenService::new(
        Arc::clone(&key_store),
        TokenServiceConfig {
            access_token_expiry_minutes: config.jwt.access_token_expiry_minutes,
            refresh_token_expiry_days: config.jwt.refresh_token_expiry_days,
        },
    ));
    let auth_service = Arc::new(AuthService::new(Arc::clone(&users)));
    let rotation_service = Arc::new(RotationService::new(
        Arc::clone(&key_store),
        channel,
        RotationConfig {
            exponent: config.keypair.exponent,
            bits: config.keypair.bits,
            exchange: config.messaging.exchange.clone(),
        },
    ));

    bootstrap::initialize(&key_store, &auth_service, &rotation_service, &config)
        .await
        .context("startup initialization failed")?;

    // Background consumer suspending compromised accounts
    let listener = SuspensionListener::new(Arc::clone(&users), config.messaging.clone());
    tokio::spawn(async move { listener.run().await });

    let app_state = web::Data::new(AppState {
        auth_service,
        token_service,
        rotation_service,
        key_store,
    });

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
