//! Token persistence handlers
//!
//! Both handlers implement the same [`TokenStore`] contract; consumption
//! is the one operation with a hard atomicity requirement. The shared
//! [`apply_consume`] routine runs entirely inside each handler's write
//! lock, so the already-consumed check and the mark can never interleave
//! across two callers.

mod file;
mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use crate::error::TokenResult;
use crate::token::{SecurityToken, TokenPurpose};
use async_trait::async_trait;
use std::collections::HashMap;

/// Result of one consumption attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumeOutcome {
    /// The token was valid and is now spent
    Consumed(SecurityToken),
    /// Unknown, wrong-purpose, expired, or already-consumed token
    Rejected,
}

impl ConsumeOutcome {
    /// The consumed token, if the attempt succeeded
    pub fn into_token(self) -> Option<SecurityToken> {
        match self {
            Self::Consumed(token) => Some(token),
            Self::Rejected => None,
        }
    }
}

/// Async persistence for security tokens.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist a freshly issued token
    async fn insert(&self, token: SecurityToken) -> TokenResult<()>;

    /// Atomically attempt to consume the token with the given hash.
    ///
    /// Every attempt against an existing token increments its attempt
    /// counter, success or not. Expired tokens are dropped on the spot.
    async fn consume(
        &self,
        token_hash: &str,
        allowed: &[TokenPurpose],
        now_ms: u64,
    ) -> TokenResult<ConsumeOutcome>;

    /// Remove unconsumed tokens whose expiry has passed; returns the count
    async fn prune_expired(&self, now_ms: u64) -> TokenResult<usize>;

    /// Look up a token by hash without consuming it (audit and tests)
    async fn find(&self, token_hash: &str) -> TokenResult<Option<SecurityToken>>;
}

/// Check-and-mark consumption over a locked token map.
///
/// Callers must hold the map's write lock for the whole call; the
/// atomicity of single-use consumption rests on that.
pub(crate) fn apply_consume(
    tokens: &mut HashMap<String, SecurityToken>,
    token_hash: &str,
    allowed: &[TokenPurpose],
    now_ms: u64,
) -> ConsumeOutcome {
    let expired = match tokens.get_mut(token_hash) {
        Some(token) => {
            token.attempts += 1;
            token.is_expired(now_ms)
        }
        None => return ConsumeOutcome::Rejected,
    };
    if expired {
        tokens.remove(token_hash);
        return ConsumeOutcome::Rejected;
    }

    let Some(token) = tokens.get_mut(token_hash) else {
        return ConsumeOutcome::Rejected;
    };
    if token.is_consumed() || !allowed.contains(&token.purpose) {
        return ConsumeOutcome::Rejected;
    }

    token.consumed_at = Some(now_ms);
    ConsumeOutcome::Consumed(token.clone())
}

/// Drop unconsumed, expired tokens from a locked map; returns the count.
pub(crate) fn apply_prune(tokens: &mut HashMap<String, SecurityToken>, now_ms: u64) -> usize {
    let before = tokens.len();
    tokens.retain(|_, token| token.is_consumed() || !token.is_expired(now_ms));
    before - tokens.len()
}
