//! Tests for rotation orchestration and broadcast semantics

use std::sync::Arc;

use crate::domain::events::{RotationEvent, PUBLIC_KEY_ROTATED};
use crate::errors::KeyError;
use crate::services::keys::KeyStore;
use crate::services::rotation::{
    BroadcastStatus, MockNotificationChannel, RotationConfig, RotationService,
};

const EXCHANGE: &str = "auth_events";

fn config() -> RotationConfig {
    RotationConfig {
        exponent: 65537,
        bits: 2048,
        exchange: EXCHANGE.to_string(),
    }
}

fn service(
    store: Arc<KeyStore>,
    channel: Arc<MockNotificationChannel>,
) -> RotationService {
    RotationService::new(store, channel, config())
}

#[tokio::test]
async fn test_rotate_swaps_key_and_broadcasts() {
    let store = Arc::new(KeyStore::new());
    store.ensure_keypair(65537, 2048).unwrap();
    let before = store.public_key_pem().unwrap();

    let channel = Arc::new(MockNotificationChannel::new());
    let outcome = service(Arc::clone(&store), Arc::clone(&channel))
        .rotate()
        .await
        .unwrap();

    assert_ne!(outcome.public_key_pem, before);
    assert!(outcome.broadcast.is_delivered());
    assert_eq!(store.public_key_pem().unwrap(), outcome.public_key_pem);

    let messages = channel.published();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].exchange, EXCHANGE);
    assert_eq!(messages[0].routing_key, None);

    let event: RotationEvent = serde_json::from_slice(&messages[0].payload).unwrap();
    assert_eq!(event.event, PUBLIC_KEY_ROTATED);
    assert_eq!(event.public_key, outcome.public_key_pem);
}

#[tokio::test]
async fn test_rotation_holds_when_broadcast_fails() {
    let store = Arc::new(KeyStore::new());
    store.ensure_keypair(65537, 2048).unwrap();
    let before = store.public_key_pem().unwrap();

    let channel = Arc::new(MockNotificationChannel::new());
    channel.set_failing(true);

    let outcome = service(Arc::clone(&store), channel).rotate().await.unwrap();

    // The new key is authoritative even though nobody heard about it.
    assert!(matches!(outcome.broadcast, BroadcastStatus::Failed { .. }));
    assert_ne!(store.public_key_pem().unwrap(), before);
    assert_eq!(store.public_key_pem().unwrap(), outcome.public_key_pem);
}

#[tokio::test]
async fn test_announce_does_not_rotate() {
    let store = Arc::new(KeyStore::new());
    store.ensure_keypair(65537, 2048).unwrap();
    let before = store.public_key_pem().unwrap();

    let channel = Arc::new(MockNotificationChannel::new());
    let outcome = service(Arc::clone(&store), Arc::clone(&channel))
        .announce()
        .await
        .unwrap();

    assert_eq!(outcome.public_key_pem, before);
    assert_eq!(store.public_key_pem().unwrap(), before);
    assert_eq!(channel.published().len(), 1);
}

#[tokio::test]
async fn test_announce_requires_keypair() {
    let store = Arc::new(KeyStore::new());
    let channel = Arc::new(MockNotificationChannel::new());

    let err = service(store, channel).announce().await.unwrap_err();

    assert!(matches!(
        err,
        crate::errors::DomainError::Key(KeyError::NotInitialized)
    ));
}

#[tokio::test]
async fn test_rotate_initializes_empty_store() {
    let store = Arc::new(KeyStore::new());
    let channel = Arc::new(MockNotificationChannel::new());

    let outcome = service(Arc::clone(&store), channel).rotate().await.unwrap();

    assert!(store.is_initialized());
    assert!(outcome.public_key_pem.contains("BEGIN PUBLIC KEY"));
}
