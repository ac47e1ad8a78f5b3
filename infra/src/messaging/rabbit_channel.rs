//! RabbitMQ implementation of the NotificationChannel trait.

use async_trait::async_trait;
use lapin::options::{BasicPublishOptions, ExchangeDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Connection, ConnectionProperties, ExchangeKind};

use kg_core::errors::NotifyError;
use kg_core::services::rotation::NotificationChannel;
use kg_shared::config::MessagingConfig;

/// Fanout publisher backed by RabbitMQ
///
/// Publishes are infrequent (one per rotation), so a fresh connection per
/// publish is preferred over keeping a long-lived channel that can go stale
/// between rotations.
pub struct RabbitNotificationChannel {
    uri: String,
}

impl RabbitNotificationChannel {
    /// Create a channel from the messaging configuration
    pub fn new(config: &MessagingConfig) -> Self {
        Self {
            uri: config.amqp_uri(),
        }
    }

    fn broadcast_failed(e: lapin::Error) -> NotifyError {
        NotifyError::BroadcastFailed {
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl NotificationChannel for RabbitNotificationChannel {
    async fn publish(
        &self,
        exchange: &str,
        routing_key: Option<&str>,
        payload: &[u8],
    ) -> Result<(), NotifyError> {
        let connection = Connection::connect(&self.uri, ConnectionProperties::default())
            .await
            .map_err(Self::broadcast_failed)?;
        let channel = connection
            .create_channel()
            .await
            .map_err(Self::broadcast_failed)?;

        channel
            .exchange_declare(
                exchange,
                ExchangeKind::Fanout,
                ExchangeDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(Self::broadcast_failed)?;

        // Wait for broker confirmation so a failed delivery is reported to
        // the caller instead of vanishing.
        channel
            .basic_publish(
                exchange,
                routing_key.unwrap_or(""),
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default().with_content_type("application/json".into()),
            )
            .await
            .map_err(Self::broadcast_failed)?
            .await
            .map_err(Self::broadcast_failed)?;

        tracing::debug!(exchange, bytes = payload.len(), "Published fanout message");
        Ok(())
    }
}
