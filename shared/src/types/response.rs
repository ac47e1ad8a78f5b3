//! API error envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint
///
/// The `error` field is a stable machine-readable code; `message` is
/// human-readable and intentionally vague for authentication failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// When the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
