//! # Keygate Shared
//!
//! Configuration and response types shared across the Keygate workspace.
//! This crate carries no business logic; it exists so that the api, core,
//! and infra layers agree on configuration shapes and the error envelope.

pub mod config;
pub mod types;
