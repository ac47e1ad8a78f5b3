//! Outbound domain events broadcast to sibling services.

use serde::{Deserialize, Serialize};

/// Event tag identifying a public-key rotation on the shared exchange
pub const PUBLIC_KEY_ROTATED: &str = "auth.public_key.rotated";

/// Notification carrying a freshly activated public key
///
/// Published on a fanout exchange so every subscriber can refresh its
/// verification key. Only the public half ever leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationEvent {
    /// Event tag, distinguishes this message from others on the exchange
    pub event: String,

    /// New public key, PEM-encoded (SubjectPublicKeyInfo)
    pub public_key: String,
}

impl RotationEvent {
    /// Creates a rotation event for the given public key PEM
    pub fn new(public_key_pem: impl Into<String>) -> Self {
        Self {
            event: PUBLIC_KEY_ROTATED.to_string(),
            public_key: public_key_pem.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_event_payload() {
        let event = RotationEvent::new("-----BEGIN PUBLIC KEY-----\n...");
        let json = serde_json::to_string(&event).unwrap();

        assert!(json.contains("\"event\":\"auth.public_key.rotated\""));
        assert!(json.contains("BEGIN PUBLIC KEY"));
    }

    #[test]
    fn test_rotation_event_round_trip() {
        let event = RotationEvent::new("pem-data");
        let json = serde_json::to_vec(&event).unwrap();
        let back: RotationEvent = serde_json::from_slice(&json).unwrap();

        assert_eq!(event, back);
    }
}
