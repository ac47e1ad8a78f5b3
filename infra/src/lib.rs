//! Infrastructure layer
//!
//! Concrete implementations of the core's persistence and messaging
//! contracts: MySQL-backed user storage via SQLx and AMQP fanout messaging
//! via lapin.

pub mod database;
pub mod messaging;
