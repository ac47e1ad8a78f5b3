//! RSA keypair ownership for JWT signing and verification
//!
//! The `KeyStore` is the only shared mutable resource in the core. It owns
//! the active keypair, generates it on demand, swaps it atomically on
//! rotation, and serves the public half as PEM.

mod store;


pub use store::{KeyMaterial, KeyStore};
