//! Credential verification and registration
//!
//! Verifies username/password pairs against stored bcrypt hashes and gates
//! registration behind the admin role.

mod password;
mod service;


pub use password::{hash_password, verify_password};
pub use service::AuthService;
