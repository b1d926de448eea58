//! File-backed token store
//!
//! Durable handler for deployments that must survive restarts. Tokens are
//! held in memory behind a write lock and snapshotted to a JSON file after
//! every mutation; the snapshot is written to a temp file and renamed into
//! place so a crash never leaves a torn file. Consumption stays atomic
//! because the snapshot happens inside the same critical section as the
//! check-and-mark.

use crate::error::{TokenError, TokenResult};
use crate::store::{apply_consume, apply_prune, ConsumeOutcome, TokenStore};
use crate::token::{SecurityToken, TokenPurpose};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// File-backed token store.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
    tokens: Arc<RwLock<HashMap<String, SecurityToken>>>,
}

impl FileTokenStore {
    /// Open a store at the given path, loading any existing snapshot.
    pub async fn open(path: impl Into<PathBuf>) -> TokenResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| TokenError::storage(e.to_string()))?;
        }

        let tokens = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let stored: Vec<SecurityToken> = serde_json::from_slice(&bytes)
                    .map_err(|e| TokenError::storage(format!("corrupt token snapshot: {e}")))?;
                stored
                    .into_iter()
                    .map(|token| (token.token_hash.clone(), token))
                    .collect()
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(TokenError::storage(err.to_string())),
        };

        debug!(path = %path.display(), count = tokens.len(), "opened token store");
        Ok(Self {
            path,
            tokens: Arc::new(RwLock::new(tokens)),
        })
    }

    /// Write the current map to disk, atomically.
    async fn persist(path: &Path, tokens: &HashMap<String, SecurityToken>) -> TokenResult<()> {
        let snapshot: Vec<&SecurityToken> = tokens.values().collect();
        let bytes = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| TokenError::storage(e.to_string()))?;

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| TokenError::storage(e.to_string()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| TokenError::storage(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn insert(&self, token: SecurityToken) -> TokenResult<()> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.token_hash.clone(), token);
        Self::persist(&self.path, &tokens).await
    }

    async fn consume(
        &self,
        token_hash: &str,
        allowed: &[TokenPurpose],
        now_ms: u64,
    ) -> TokenResult<ConsumeOutcome> {
        let mut tokens = self.tokens.write().await;
        let outcome = apply_consume(&mut tokens, token_hash, allowed, now_ms);
        Self::persist(&self.path, &tokens).await?;
        Ok(outcome)
    }

    async fn prune_expired(&self, now_ms: u64) -> TokenResult<usize> {
        let mut tokens = self.tokens.write().await;
        let pruned = apply_prune(&mut tokens, now_ms);
        if pruned > 0 {
            Self::persist(&self.path, &tokens).await?;
        }
        Ok(pruned)
    }

    async fn find(&self, token_hash: &str) -> TokenResult<Option<SecurityToken>> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).cloned())
    }
}
