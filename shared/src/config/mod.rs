//! Environment-driven configuration for the Keygate services.

pub mod auth;
pub mod database;
pub mod messaging;
pub mod server;

pub use auth::{JwtConfig, KeypairConfig};
pub use database::DatabaseConfig;
pub use messaging::MessagingConfig;
pub use server::ServerConfig;
