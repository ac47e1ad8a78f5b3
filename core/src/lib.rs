//! # Keygate Core
//!
//! Core business logic and domain layer for the Keygate authentication service.
//! This crate contains the domain entities, the RSA key store, the token
//! service, credential verification, rotation broadcasting, repository
//! interfaces, and the error taxonomy. It has no HTTP, database, or broker
//! dependencies; those live in the infra and api layers.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
