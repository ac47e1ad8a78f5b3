//! Rotation orchestration: swap the keypair, then broadcast the public key

use std::sync::Arc;

use crate::domain::events::RotationEvent;
use crate::errors::{DomainResult, NotifyError};
use crate::services::keys::KeyStore;

use super::channel::NotificationChannel;

/// Configuration for rotation: key parameters and the target exchange
#[derive(Debug, Clone)]
pub struct RotationConfig {
    /// RSA public exponent
    pub exponent: u64,
    /// RSA modulus size in bits
    pub bits: usize,
    /// Fanout exchange the rotation event is published to
    pub exchange: String,
}

/// Whether the rotation broadcast reached the broker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastStatus {
    /// The broker accepted the event
    Delivered,
    /// The event was not delivered; the rotation itself still took effect
    Failed { reason: String },
}

impl BroadcastStatus {
    pub fn is_delivered(&self) -> bool {
        matches!(self, BroadcastStatus::Delivered)
    }
}

/// Result of a rotation or announcement
#[derive(Debug, Clone)]
pub struct RotationOutcome {
    /// The public key now in effect, PEM-encoded
    pub public_key_pem: String,
    /// Delivery status of the broadcast
    pub broadcast: BroadcastStatus,
}

/// Service driving keypair rotation and its fanout announcement
pub struct RotationService {
    key_store: Arc<KeyStore>,
    channel: Arc<dyn NotificationChannel>,
    config: RotationConfig,
}

impl RotationService {
    /// Creates a new rotation service
    pub fn new(
        key_store: Arc<KeyStore>,
        channel: Arc<dyn NotificationChannel>,
        config: RotationConfig,
    ) -> Self {
        Self {
            key_store,
            channel,
            config,
        }
    }

    /// Generates a fresh keypair, swaps it in, and broadcasts the public key
    ///
    /// The swap happens before the broadcast: once this returns, tokens signed
    /// by the old key no longer verify, regardless of whether the broadcast
    /// succeeded. A failed broadcast is reported in the outcome, not as an
    /// error, so the caller can surface partial success and re-announce later.
    pub async fn rotate(&self) -> DomainResult<RotationOutcome> {
        let material = self.key_store.rotate(self.config.exponent, self.config.bits)?;
        tracing::info!("Rotated signing keypair");

        let broadcast = self.broadcast(material.public_key_pem()).await;
        Ok(RotationOutcome {
            public_key_pem: material.public_key_pem().to_string(),
            broadcast,
        })
    }

    /// Broadcasts the current public key without rotating
    ///
    /// Used at startup so subscribers that missed earlier events converge, and
    /// to retry after a rotation whose broadcast failed.
    pub async fn announce(&self) -> DomainResult<RotationOutcome> {
        let pem = self.key_store.public_key_pem()?;
        let broadcast = self.broadcast(&pem).await;

        Ok(RotationOutcome {
            public_key_pem: pem,
            broadcast,
        })
    }

    async fn broadcast(&self, public_key_pem: &str) -> BroadcastStatus {
        let event = RotationEvent::new(public_key_pem);
        let payload = match serde_json::to_vec(&event) {
            Ok(bytes) => bytes,
            Err(e) => {
                return BroadcastStatus::Failed {
                    reason: NotifyError::BroadcastFailed {
                        message: format!("Event serialization failed: {e}"),
                    }
                    .to_string(),
                }
            }
        };

        match self
            .channel
            .publish(&self.config.exchange, None, &payload)
            .await
        {
            Ok(()) => {
                tracing::info!(exchange = %self.config.exchange, "Broadcast public key");
                BroadcastStatus::Delivered
            }
            Err(e) => {
                tracing::error!(exchange = %self.config.exchange, error = %e, "Public key broadcast failed");
                BroadcastStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
