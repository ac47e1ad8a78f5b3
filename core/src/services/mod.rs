//! Domain services: key store, token issuance, credential verification,
//! and rotation broadcasting.

pub mod auth;
pub mod keys;
pub mod rotation;
pub mod token;

pub use auth::AuthService;
pub use keys::KeyStore;
pub use rotation::{NotificationChannel, RotationService};
pub use token::TokenService;
