//! In-memory token store
//!
//! Process-lifetime storage for tests and single-process deployments.
//! The single-use contract is identical to the durable handler; only
//! durability differs.

use crate::error::TokenResult;
use crate::store::{apply_consume, apply_prune, ConsumeOutcome, TokenStore};
use crate::token::{SecurityToken, TokenPurpose};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory token store over a shared map keyed by token hash.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    tokens: Arc<RwLock<HashMap<String, SecurityToken>>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tokens
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// True when no tokens are stored
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn insert(&self, token: SecurityToken) -> TokenResult<()> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.token_hash.clone(), token);
        Ok(())
    }

    async fn consume(
        &self,
        token_hash: &str,
        allowed: &[TokenPurpose],
        now_ms: u64,
    ) -> TokenResult<ConsumeOutcome> {
        let mut tokens = self.tokens.write().await;
        Ok(apply_consume(&mut tokens, token_hash, allowed, now_ms))
    }

    async fn prune_expired(&self, now_ms: u64) -> TokenResult<usize> {
        let mut tokens = self.tokens.write().await;
        Ok(apply_prune(&mut tokens, now_ms))
    }

    async fn find(&self, token_hash: &str) -> TokenResult<Option<SecurityToken>> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).cloned())
    }
}
