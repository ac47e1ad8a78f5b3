//! HTTP API layer
//!
//! Exposes the authentication service over Actix-web: login, token refresh,
//! admin-gated registration and key rotation, and public key export.

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
