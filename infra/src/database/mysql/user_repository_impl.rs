//! MySQL implementation of the UserRepository trait.
//!
//! Persists principals in the `users` table with SQLx. UUIDs are stored as
//! CHAR(36) strings and the lifecycle status as its lowercase string form.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use kg_core::domain::entities::user::{User, UserStatus};
use kg_core::errors::DomainError;
use kg_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;
        let status: String = row.try_get("status").map_err(|e| DomainError::Internal {
            message: format!("Failed to get status: {}", e),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            username: row.try_get("username").map_err(|e| DomainError::Internal {
                message: format!("Failed to get username: {}", e),
            })?,
            role: row.try_get("role").map_err(|e| DomainError::Internal {
                message: format!("Failed to get role: {}", e),
            })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get password_hash: {}", e),
                })?,
            status: UserStatus::parse(&status),
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, role, password_hash, status, created_at, updated_at
            FROM users
            WHERE username = ?
        "#;

        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find user by username: {}", e),
            })?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, username, role, password_hash, status, created_at, updated_at
            FROM users
            WHERE id = ?
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find user by id: {}", e),
            })?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, username, role, password_hash, status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.role)
            .bind(&user.password_hash)
            .bind(user.status.as_str())
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to create user: {}", e),
            })?;

        Ok(user)
    }

    async fn update_status(&self, id: Uuid, status: UserStatus) -> Result<bool, DomainError> {
        let query = "UPDATE users SET status = ?, updated_at = ? WHERE id = ?";

        let result = sqlx::query(query)
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to update user status: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let query = "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?) as present";

        let row = sqlx::query(query)
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to check username existence: {}", e),
            })?;

        let present: i8 = row.try_get("present").map_err(|e| DomainError::Internal {
            message: format!("Failed to get existence result: {}", e),
        })?;
        Ok(present == 1)
    }
}
