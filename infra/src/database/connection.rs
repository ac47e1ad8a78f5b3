//! MySQL connection pool management

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use kg_core::errors::DomainError;
use kg_shared::config::DatabaseConfig;

/// Creates a MySQL connection pool from the database configuration
///
/// # Errors
///
/// Returns `DomainError::Database` when the database is unreachable or the
/// URL is malformed.
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, DomainError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to connect to database: {}", e),
        })?;

    tracing::info!(
        max_connections = config.max_connections,
        "Database connection pool established"
    );
    Ok(pool)
}
