//! RS256 token issuance and verification

use std::sync::Arc;

use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::services::keys::KeyStore;

use super::config::TokenServiceConfig;

/// Service minting and verifying signed tokens
///
/// Issuance and verification are pure once the keypair exists; the only
/// shared state is the key store snapshot taken per call, so this service is
/// freely shareable across request handlers.
pub struct TokenService {
    key_store: Arc<KeyStore>,
    config: TokenServiceConfig,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service over the given key store
    pub fn new(key_store: Arc<KeyStore>, config: TokenServiceConfig) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        // Expiry is enforced strictly: a token is rejected once the current
        // Unix second exceeds `exp`.
        validation.leeway = 0;

        Self {
            key_store,
            config,
            validation,
        }
    }

    /// Issues an access token carrying the subject and role
    ///
    /// # Errors
    ///
    /// `KeyError::NotInitialized` when no keypair has been established yet.
    pub fn issue_access_token(&self, user_id: Uuid, role: &str) -> DomainResult<String> {
        let claims =
            Claims::new_access_token(user_id, role, self.config.access_token_expiry_minutes);
        self.encode_jwt(&claims)
    }

    /// Issues a refresh token carrying identity only
    ///
    /// Refresh tokens never embed a role; the role is re-resolved from the
    /// user repository on every refresh.
    pub fn issue_refresh_token(&self, user_id: Uuid) -> DomainResult<String> {
        let claims = Claims::new_refresh_token(user_id, self.config.refresh_token_expiry_days);
        self.encode_jwt(&claims)
    }

    /// Issues a matched access/refresh pair for a verified identity
    pub fn issue_token_pair(&self, user_id: Uuid, role: &str) -> DomainResult<TokenPair> {
        let access_token = self.issue_access_token(user_id, role)?;
        let refresh_token = self.issue_refresh_token(user_id)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry_minutes * 60,
        ))
    }

    /// Verifies a token against the current public key and expected kind
    ///
    /// # Errors
    ///
    /// * `TokenError::TokenExpired` - `exp` has passed (zero leeway)
    /// * `TokenError::InvalidSignature` - signed by a different keypair
    /// * `TokenError::Malformed` - not parseable as a JWT
    /// * `TokenError::InvalidTokenType` - `type` claim does not match `expected`
    /// * `KeyError::NotInitialized` - no keypair exists yet
    pub fn verify_token(&self, token: &str, expected: TokenKind) -> DomainResult<Claims> {
        let material = self.key_store.current()?;

        let token_data = decode::<Claims>(token, material.decoding_key(), &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                ErrorKind::InvalidSignature => DomainError::Token(TokenError::InvalidSignature),
                _ => DomainError::Token(TokenError::Malformed),
            })?;

        let claims = token_data.claims;
        if !claims.is_kind(expected) {
            return Err(DomainError::Token(TokenError::InvalidTokenType {
                expected: expected.as_str().to_string(),
                actual: claims.token_type,
            }));
        }

        Ok(claims)
    }

    /// Signs a claim set with the current private key
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        let material = self.key_store.current()?;
        let header = Header::new(Algorithm::RS256);

        encode(&header, claims, material.encoding_key())
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}
