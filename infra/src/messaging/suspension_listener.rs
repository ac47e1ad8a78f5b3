//! Listener suspending accounts reported as compromised.
//!
//! Sibling services publish a notice to a shared queue when they detect that
//! a principal's credentials leaked. This listener consumes the queue and
//! flips the account to suspended, which blocks both login and refresh.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use lapin::message::Delivery;
use lapin::options::{BasicAckOptions, BasicConsumeOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{Connection, ConnectionProperties};
use serde::Deserialize;
use uuid::Uuid;

use kg_core::domain::entities::user::UserStatus;
use kg_core::repositories::UserRepository;
use kg_shared::config::MessagingConfig;

const CONSUMER_TAG: &str = "keygate-suspension";
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Notice that a principal's credentials are compromised
#[derive(Debug, Deserialize)]
pub(crate) struct CompromiseNotice {
    pub user_id: Uuid,
}

/// Background consumer of the compromised-credentials queue
pub struct SuspensionListener<U: UserRepository> {
    users: Arc<U>,
    config: MessagingConfig,
}

impl<U: UserRepository> SuspensionListener<U> {
    /// Create a listener over the given repository and broker configuration
    pub fn new(users: Arc<U>, config: MessagingConfig) -> Self {
        Self { users, config }
    }

    /// Consume the queue forever, reconnecting after broker failures
    pub async fn run(&self) {
        loop {
            if let Err(e) = self.consume().await {
                tracing::warn!(error = %e, "Compromise listener disconnected, retrying");
            }
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    }

    async fn consume(&self) -> Result<(), lapin::Error> {
        let connection =
            Connection::connect(&self.config.amqp_uri(), ConnectionProperties::default()).await?;
        let channel = connection.create_channel().await?;

        channel
            .queue_declare(
                &self.config.compromised_queue,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;

        let mut consumer = channel
            .basic_consume(
                &self.config.compromised_queue,
                CONSUMER_TAG,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await?;

        tracing::info!(queue = %self.config.compromised_queue, "Listening for compromise notices");

        while let Some(delivery) = consumer.next().await {
            let delivery = delivery?;
            self.handle(&delivery).await;
            delivery.ack(BasicAckOptions::default()).await?;
        }

        Ok(())
    }

    /// Process one notice; malformed or failing messages are logged and
    /// dropped so a poison message cannot wedge the queue.
    async fn handle(&self, delivery: &Delivery) {
        let notice: CompromiseNotice = match serde_json::from_slice(&delivery.data) {
            Ok(notice) => notice,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed compromise notice");
                return;
            }
        };

        match self
            .users
            .update_status(notice.user_id, UserStatus::Suspended)
            .await
        {
            Ok(true) => {
                tracing::warn!(user_id = %notice.user_id, "Suspended compromised account");
            }
            Ok(false) => {
                tracing::debug!(user_id = %notice.user_id, "Compromise notice for unknown user");
            }
            Err(e) => {
                tracing::error!(user_id = %notice.user_id, error = %e, "Failed to suspend account");
            }
        }
    }
}
