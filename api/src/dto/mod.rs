//! Request and response data transfer objects

pub mod auth_dto;
pub mod error;

pub use error::{ErrorResponse, ErrorResponseExt};
