//! API process configuration assembled from environment variables

use kg_shared::config::{DatabaseConfig, JwtConfig, KeypairConfig, MessagingConfig, ServerConfig};

/// Everything the binary needs to start
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub messaging: MessagingConfig,
    pub jwt: JwtConfig,
    pub keypair: KeypairConfig,
    /// Seed admin credentials, created at startup if absent
    pub admin_username: String,
    pub admin_password: String,
}

impl ApiConfig {
    /// Load all sections from the environment
    ///
    /// `ADMIN_USERNAME` / `ADMIN_PASSWORD` override the seed admin account;
    /// the defaults are only suitable for development.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            messaging: MessagingConfig::from_env(),
            jwt: JwtConfig::from_env(),
            keypair: KeypairConfig::from_env(),
            admin_username: std::env::var("ADMIN_USERNAME")
                .unwrap_or_else(|_| "admin@example.com".to_string()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| "Admin1234".to_string()),
        }
    }
}
