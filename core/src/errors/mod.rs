//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, KeyError, NotifyError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

pub type DomainResult<T> = Result<T, DomainError>;
