//! Value objects returned by the domain services.

pub mod identity;

pub use identity::VerifiedIdentity;
