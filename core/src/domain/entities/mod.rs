//! Domain entities for the Keygate service.

pub mod token;
pub mod user;

pub use token::{Claims, TokenKind, TokenPair};
pub use user::{User, UserStatus, ADMIN_ROLE};
