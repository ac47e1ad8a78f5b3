//! Notification channel trait for broadcasting events to sibling services

use async_trait::async_trait;

use crate::errors::NotifyError;

/// Transport-agnostic fanout publisher
///
/// The core publishes to a named exchange and leaves delivery semantics to the
/// implementation. The AMQP-backed implementation lives in the infrastructure
/// layer.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Publish a payload to the given exchange
    ///
    /// `routing_key` is ignored by fanout exchanges but kept in the contract
    /// so direct or topic transports can slot in without changing callers.
    async fn publish(
        &self,
        exchange: &str,
        routing_key: Option<&str>,
        payload: &[u8],
    ) -> Result<(), NotifyError>;
}
