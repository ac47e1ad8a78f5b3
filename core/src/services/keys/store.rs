//! Owned RSA keypair store.

use std::sync::{Arc, RwLock};

use jsonwebtoken::{DecodingKey, EncodingKey};
use rand::rngs::OsRng;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};

use crate::errors::KeyError;

/// One complete generation of signing material
///
/// Immutable once built; the store replaces the whole value on rotation so
/// readers never observe a private key paired with a foreign public key.
pub struct KeyMaterial {
    /// Private key for signing JWTs
    encoding_key: EncodingKey,
    /// Public key for verifying JWTs
    decoding_key: DecodingKey,
    /// Public key as PEM text (SubjectPublicKeyInfo)
    public_key_pem: String,
}

impl KeyMaterial {
    /// Returns the encoding key for signing JWTs
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Returns the public key PEM
    pub fn public_key_pem(&self) -> &str {
        &self.public_key_pem
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.debug_struct("KeyMaterial").finish_non_exhaustive()
    }
}

/// Owner of the active RSA keypair
///
/// Replaces the source system's process-wide singleton with an injectable
/// resource: construct one per service instance and share it behind an `Arc`.
/// Readers take an `Arc<KeyMaterial>` snapshot, so `rotate` is atomic from
/// their perspective.
pub struct KeyStore {
    inner: RwLock<Option<Arc<KeyMaterial>>>,
}

impl KeyStore {
    /// Creates an empty store; no keypair exists until `ensure_keypair`
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Generates a keypair if none exists yet; otherwise a no-op
    ///
    /// Generation happens while holding the write lock, so concurrent callers
    /// observe exactly one generated keypair. The only readers that can block
    /// on this are requests racing the very first initialization, before any
    /// token exists.
    pub fn ensure_keypair(&self, exponent: u64, bits: usize) -> Result<(), KeyError> {
        let mut guard = self.write_guard();
        if guard.is_some() {
            return Ok(());
        }

        let material = Self::generate(exponent, bits)?;
        *guard = Some(Arc::new(material));
        tracing::info!(bits, "signing keypair generated");
        Ok(())
    }

    /// Discards the current keypair and installs a fresh one
    ///
    /// The replacement is generated before the write lock is taken: token
    /// verification keeps running against the old keypair during the (slow)
    /// generation, and a generation failure leaves the old keypair in place.
    pub fn rotate(&self, exponent: u64, bits: usize) -> Result<Arc<KeyMaterial>, KeyError> {
        let material = Arc::new(Self::generate(exponent, bits)?);

        let mut guard = self.write_guard();
        *guard = Some(Arc::clone(&material));
        tracing::info!(bits, "signing keypair rotated");
        Ok(material)
    }

    /// Snapshot of the active material
    pub fn current(&self) -> Result<Arc<KeyMaterial>, KeyError> {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.clone().ok_or(KeyError::NotInitialized)
    }

    /// Exports the active public key as PEM text
    pub fn public_key_pem(&self) -> Result<String, KeyError> {
        Ok(self.current()?.public_key_pem().to_string())
    }

    /// Whether a keypair has been generated
    pub fn is_initialized(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, Option<Arc<KeyMaterial>>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn generate(exponent: u64, bits: usize) -> Result<KeyMaterial, KeyError> {
        let mut rng = OsRng;
        let private_key = RsaPrivateKey::new_with_exp(&mut rng, bits, &BigUint::from(exponent))
            .map_err(|e| KeyError::GenerationFailed {
                message: e.to_string(),
            })?;
        let public_key = RsaPublicKey::from(&private_key);

        let private_pem =
            private_key
                .to_pkcs8_pem(LineEnding::LF)
                .map_err(|e| KeyError::EncodingFailed {
                    message: e.to_string(),
                })?;
        let public_key_pem =
            public_key
                .to_public_key_pem(LineEnding::LF)
                .map_err(|e| KeyError::EncodingFailed {
                    message: e.to_string(),
                })?;

        let encoding_key = EncodingKey::from_rsa_pem(private_pem.as_bytes()).map_err(|e| {
            KeyError::EncodingFailed {
                message: e.to_string(),
            }
        })?;
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
            KeyError::EncodingFailed {
                message: e.to_string(),
            }
        })?;

        Ok(KeyMaterial {
            encoding_key,
            decoding_key,
            public_key_pem,
        })
    }
}

impl Default for KeyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStore")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
