//! Keypair rotation and broadcast
//!
//! Rotation swaps the signing keypair, then announces the new public key on a
//! fanout exchange. The swap is authoritative even when the broadcast fails;
//! callers learn about a failed broadcast through [`BroadcastStatus`] and can
//! re-announce without rotating again.

mod channel;
mod mock;
mod service;

#[cfg(test)]
mod tests;

pub use channel::NotificationChannel;
pub use mock::{MockNotificationChannel, PublishedMessage};
pub use service::{BroadcastStatus, RotationConfig, RotationOutcome, RotationService};
