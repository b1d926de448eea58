//! Issue / consume / prune service
//!
//! The lifecycle callers use: issue a token and transport the raw secret
//! (e.g. inside an emailed link), consume it exactly once, prune what
//! expired unconsumed. The raw secret exists only in the returned
//! [`IssuedToken`]; storage and logs only ever see the keyed hash.

use crate::config::{TokenConfig, TokenPersistence};
use crate::error::{TokenError, TokenResult};
use crate::hashing::{generate_secret, TokenKey};
use crate::store::{FileTokenStore, MemoryTokenStore, TokenStore};
use crate::token::{SecurityToken, TokenPurpose};
use prism_core::{Clock, UserId};
use std::sync::Arc;
use tracing::{debug, info};

const MILLIS_PER_HOUR: u64 = 60 * 60 * 1000;

/// A freshly issued token.
///
/// `secret` is the bearer credential for transport to the user; it is not
/// recoverable afterwards.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Raw bearer secret, hex-encoded
    pub secret: String,
    /// Keyed hash under which the token is stored
    pub token_hash: String,
    /// Expiry time, milliseconds since the Unix epoch
    pub expires_at: u64,
}

/// Single-use token lifecycle service.
pub struct TokenService {
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    key: TokenKey,
}

impl TokenService {
    /// Create a service over an explicit store and clock
    pub fn new(store: Arc<dyn TokenStore>, clock: Arc<dyn Clock>, key: TokenKey) -> Self {
        Self { store, clock, key }
    }

    /// Build a service from deployment configuration, selecting the store
    /// handler from the persistence toggle.
    pub async fn from_config(config: TokenConfig, clock: Arc<dyn Clock>) -> TokenResult<Self> {
        let store: Arc<dyn TokenStore> = match config.persistence {
            TokenPersistence::Disabled => Arc::new(MemoryTokenStore::new()),
            TokenPersistence::Enabled { path } => Arc::new(FileTokenStore::open(path).await?),
        };
        Ok(Self::new(store, clock, config.key))
    }

    /// Issue a token for the given user, email, and purpose.
    ///
    /// Returns the raw secret for transport; only the hash is persisted.
    pub async fn issue(
        &self,
        user_id: UserId,
        email: impl Into<String>,
        purpose: TokenPurpose,
        ttl_hours: u32,
    ) -> TokenResult<IssuedToken> {
        if ttl_hours == 0 {
            return Err(TokenError::invalid_ttl("TTL must be greater than zero"));
        }

        let now = self.clock.now_ms().await;
        let expires_at = now + u64::from(ttl_hours) * MILLIS_PER_HOUR;
        let secret = generate_secret();
        let token_hash = self.key.hash(&secret);

        let token = SecurityToken {
            token_hash: token_hash.clone(),
            user_id,
            email: email.into(),
            purpose,
            issued_at: now,
            expires_at,
            consumed_at: None,
            attempts: 0,
        };
        self.store.insert(token).await?;
        info!(user = %user_id, purpose = %purpose, expires_at, "issued security token");

        Ok(IssuedToken {
            secret,
            token_hash,
            expires_at,
        })
    }

    /// Attempt to consume a raw token for one of the allowed purposes.
    ///
    /// Returns `None` for every failure sub-cause - unknown token, wrong
    /// purpose, expired, or already consumed - so callers cannot
    /// distinguish them.
    pub async fn consume(
        &self,
        raw_secret: &str,
        allowed: &[TokenPurpose],
    ) -> TokenResult<Option<SecurityToken>> {
        let now = self.clock.now_ms().await;
        let token_hash = self.key.hash(raw_secret);
        let outcome = self.store.consume(&token_hash, allowed, now).await?;
        let token = outcome.into_token();
        debug!(consumed = token.is_some(), "token consumption attempt");
        Ok(token)
    }

    /// Remove unconsumed tokens whose expiry has passed.
    pub async fn prune_expired(&self) -> TokenResult<usize> {
        let now = self.clock.now_ms().await;
        let pruned = self.store.prune_expired(now).await?;
        if pruned > 0 {
            info!(pruned, "pruned expired security tokens");
        }
        Ok(pruned)
    }

    /// The store behind this service (audit and tests)
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::ManualClock;

    fn service(clock: Arc<ManualClock>) -> TokenService {
        TokenService::new(
            Arc::new(MemoryTokenStore::new()),
            clock,
            TokenKey::from_bytes([5u8; 32]),
        )
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let service = service(Arc::new(ManualClock::new(0)));
        let err = service
            .issue(UserId::new(), "a@example.com", TokenPurpose::PasswordReset, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, TokenError::InvalidTtl { .. }));
    }

    #[tokio::test]
    async fn test_issue_sets_expiry_from_clock() {
        let clock = Arc::new(ManualClock::new(1_000));
        let service = service(clock);
        let issued = service
            .issue(UserId::new(), "a@example.com", TokenPurpose::PasswordReset, 2)
            .await
            .unwrap();
        assert_eq!(issued.expires_at, 1_000 + 2 * MILLIS_PER_HOUR);
    }

    #[tokio::test]
    async fn test_secret_is_not_the_stored_hash() {
        let service = service(Arc::new(ManualClock::new(0)));
        let issued = service
            .issue(UserId::new(), "a@example.com", TokenPurpose::PasswordReset, 1)
            .await
            .unwrap();
        assert_ne!(issued.secret, issued.token_hash);

        let stored = service.store().find(&issued.token_hash).await.unwrap();
        assert!(stored.is_some());
        assert!(service.store().find(&issued.secret).await.unwrap().is_none());
    }
}
