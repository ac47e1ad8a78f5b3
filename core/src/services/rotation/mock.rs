//! In-memory notification channel for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::NotifyError;

use super::channel::NotificationChannel;

/// Message captured by the mock channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub exchange: String,
    pub routing_key: Option<String>,
    pub payload: Vec<u8>,
}

/// Mock channel recording every publish in memory
pub struct MockNotificationChannel {
    messages: Arc<Mutex<Vec<PublishedMessage>>>,
    fail: AtomicBool,
}

impl MockNotificationChannel {
    /// Create a channel that accepts every publish
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            fail: AtomicBool::new(false),
        }
    }

    /// Make subsequent publishes fail
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Messages recorded so far
    pub fn published(&self) -> Vec<PublishedMessage> {
        self.messages
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

impl Default for MockNotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationChannel for MockNotificationChannel {
    async fn publish(
        &self,
        exchange: &str,
        routing_key: Option<&str>,
        payload: &[u8],
    ) -> Result<(), NotifyError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::BroadcastFailed {
                message: "mock channel configured to fail".to_string(),
            });
        }

        self.messages
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(PublishedMessage {
                exchange: exchange.to_string(),
                routing_key: routing_key.map(str::to_string),
                payload: payload.to_vec(),
            });

        Ok(())
    }
}
