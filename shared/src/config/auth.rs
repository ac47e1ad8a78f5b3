//! Token and keypair configuration

use serde::{Deserialize, Serialize};

/// JWT lifetime configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_expiry_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
        }
    }
}

impl JwtConfig {
    /// Load from `JWT_ACCESS_TOKEN_MINUTES` / `JWT_REFRESH_TOKEN_DAYS`
    /// environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_token_expiry_minutes: std::env::var("JWT_ACCESS_TOKEN_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expiry_minutes),
            refresh_token_expiry_days: std::env::var("JWT_REFRESH_TOKEN_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_expiry_days),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry_days = days;
        self
    }
}

/// RSA keypair generation parameters
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct KeypairConfig {
    /// Public exponent, conventionally 65537
    pub exponent: u64,

    /// Modulus size in bits
    pub bits: usize,
}

impl Default for KeypairConfig {
    fn default() -> Self {
        Self {
            exponent: 65537,
            bits: 2048,
        }
    }
}

impl KeypairConfig {
    /// Load from `RSA_PUBLIC_EXPONENT` / `RSA_KEY_BITS` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            exponent: std::env::var("RSA_PUBLIC_EXPONENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.exponent),
            bits: std::env::var("RSA_KEY_BITS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.bits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry_minutes, 15);
        assert_eq!(config.refresh_token_expiry_days, 7);
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::default()
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry_minutes, 30);
        assert_eq!(config.refresh_token_expiry_days, 14);
    }

    #[test]
    fn test_keypair_config_default() {
        let config = KeypairConfig::default();
        assert_eq!(config.exponent, 65537);
        assert_eq!(config.bits, 2048);
    }
}
