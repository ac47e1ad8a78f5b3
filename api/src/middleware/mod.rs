//! HTTP middleware: JWT authentication and CORS

pub mod auth;
pub mod cors;

pub use auth::{AuthContext, JwtAuth};
