//! Token service module for JWT management
//!
//! Handles RS256 access and refresh token issuance and verification against
//! the keypair held by the [`KeyStore`](crate::services::keys::KeyStore).

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
