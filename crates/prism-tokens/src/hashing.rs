//! Keyed hashing of bearer secrets
//!
//! Secrets are hashed with HMAC-SHA-256 under a deployment-level key
//! before they touch storage, so a leaked token table cannot be replayed
//! without the key.

use crate::error::{TokenError, TokenResult};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Length of a generated bearer secret, in bytes (hex doubles it on the
/// wire).
pub const SECRET_BYTES: usize = 32;

/// Deployment key protecting token hashes at rest.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenKey([u8; 32]);

impl TokenKey {
    /// Create a key from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a key from its 64-character hex form
    pub fn from_hex(hex_key: &str) -> TokenResult<Self> {
        let bytes = hex::decode(hex_key)
            .map_err(|_| TokenError::config("token key must be hex-encoded"))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| TokenError::config("token key must be exactly 32 bytes"))?;
        Ok(Self(bytes))
    }

    /// Generate a random key
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Hash a raw bearer secret, returning the hex-encoded digest
    pub fn hash(&self, raw_secret: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.0).expect("HMAC-SHA-256 accepts any key length");
        mac.update(raw_secret.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        write!(f, "TokenKey(..)")
    }
}

/// Generate a random bearer secret, hex-encoded.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_per_key() {
        let key = TokenKey::from_bytes([7u8; 32]);
        let secret = generate_secret();
        assert_eq!(key.hash(&secret), key.hash(&secret));
    }

    #[test]
    fn test_hash_differs_across_keys() {
        let a = TokenKey::from_bytes([1u8; 32]);
        let b = TokenKey::from_bytes([2u8; 32]);
        assert_ne!(a.hash("secret"), b.hash("secret"));
    }

    #[test]
    fn test_hash_never_contains_secret() {
        let key = TokenKey::generate();
        let secret = generate_secret();
        assert!(!key.hash(&secret).contains(&secret));
    }

    #[test]
    fn test_from_hex_round_trip() {
        let key = TokenKey::from_bytes([9u8; 32]);
        let parsed = TokenKey::from_hex(&hex::encode([9u8; 32])).unwrap();
        assert_eq!(key, parsed);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(TokenKey::from_hex("zz").is_err());
        assert!(TokenKey::from_hex(&hex::encode([1u8; 16])).is_err());
    }

    #[test]
    fn test_generated_secrets_are_unique() {
        assert_ne!(generate_secret(), generate_secret());
        assert_eq!(generate_secret().len(), SECRET_BYTES * 2);
    }

    #[test]
    fn test_debug_hides_key_material() {
        let key = TokenKey::from_bytes([3u8; 32]);
        assert_eq!(format!("{key:?}"), "TokenKey(..)");
    }
}
