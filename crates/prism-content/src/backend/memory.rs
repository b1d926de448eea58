//! In-memory record backend
//!
//! Process-lifetime storage for tests and single-process deployments.
//! Rows are bucketed by `(block, scope)` so scans never cross a tenant
//! boundary.

use crate::backend::RecordBackend;
use crate::error::ContentResult;
use crate::record::ContentRecord;
use async_trait::async_trait;
use prism_core::{RecordId, TenantScope};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BucketKey {
    block: String,
    scope: TenantScope,
}

impl BucketKey {
    fn new(block: &str, scope: &TenantScope) -> Self {
        Self {
            block: block.to_string(),
            scope: *scope,
        }
    }
}

/// In-memory record backend over a shared map.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordBackend {
    buckets: Arc<RwLock<HashMap<BucketKey, HashMap<RecordId, ContentRecord>>>>,
}

impl MemoryRecordBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records across all buckets
    pub async fn len(&self) -> usize {
        let buckets = self.buckets.read().await;
        buckets.values().map(HashMap::len).sum()
    }

    /// True when nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecordBackend for MemoryRecordBackend {
    async fn insert(&self, record: ContentRecord) -> ContentResult<()> {
        let key = BucketKey::new(&record.block, &record.scope);
        let mut buckets = self.buckets.write().await;
        buckets.entry(key).or_default().insert(record.id, record);
        Ok(())
    }

    async fn fetch(
        &self,
        block: &str,
        scope: &TenantScope,
        id: RecordId,
    ) -> ContentResult<Option<ContentRecord>> {
        let buckets = self.buckets.read().await;
        Ok(buckets
            .get(&BucketKey::new(block, scope))
            .and_then(|bucket| bucket.get(&id))
            .cloned())
    }

    async fn scan(&self, block: &str, scope: &TenantScope) -> ContentResult<Vec<ContentRecord>> {
        let buckets = self.buckets.read().await;
        Ok(buckets
            .get(&BucketKey::new(block, scope))
            .map(|bucket| bucket.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn replace(&self, record: ContentRecord) -> ContentResult<bool> {
        let key = BucketKey::new(&record.block, &record.scope);
        let mut buckets = self.buckets.write().await;
        match buckets.get_mut(&key) {
            Some(bucket) if bucket.contains_key(&record.id) => {
                bucket.insert(record.id, record);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn remove(
        &self,
        block: &str,
        scope: &TenantScope,
        id: RecordId,
    ) -> ContentResult<bool> {
        let mut buckets = self.buckets.write().await;
        Ok(buckets
            .get_mut(&BucketKey::new(block, scope))
            .map(|bucket| bucket.remove(&id).is_some())
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn record(block: &str, scope: TenantScope) -> ContentRecord {
        ContentRecord {
            id: RecordId::new(),
            block: block.to_string(),
            scope,
            parent_id: None,
            content: json!({"k": "v"}),
            indexer: Map::new(),
            created_at: 1,
            updated_at: 1,
        }
    }

    #[tokio::test]
    async fn test_insert_fetch_remove() {
        let backend = MemoryRecordBackend::new();
        let rec = record("Guest", TenantScope::Platform);
        let id = rec.id;

        backend.insert(rec.clone()).await.unwrap();
        let found = backend
            .fetch("Guest", &TenantScope::Platform, id)
            .await
            .unwrap();
        assert_eq!(found, Some(rec));

        assert!(backend
            .remove("Guest", &TenantScope::Platform, id)
            .await
            .unwrap());
        assert!(!backend
            .remove("Guest", &TenantScope::Platform, id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_scan_is_scope_bucketed() {
        let backend = MemoryRecordBackend::new();
        let t1 = TenantScope::tenant(prism_core::TenantId::new());
        let t2 = TenantScope::tenant(prism_core::TenantId::new());

        backend.insert(record("Speaker", t1)).await.unwrap();
        backend.insert(record("Speaker", t2)).await.unwrap();

        assert_eq!(backend.scan("Speaker", &t1).await.unwrap().len(), 1);
        assert_eq!(backend.scan("Speaker", &t2).await.unwrap().len(), 1);
        assert!(backend
            .scan("Speaker", &TenantScope::Platform)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(backend.len().await, 2);
    }

    #[tokio::test]
    async fn test_replace_requires_existing_row() {
        let backend = MemoryRecordBackend::new();
        let mut rec = record("Guest", TenantScope::Platform);

        assert!(!backend.replace(rec.clone()).await.unwrap());

        backend.insert(rec.clone()).await.unwrap();
        rec.content = json!({"k": "updated"});
        assert!(backend.replace(rec.clone()).await.unwrap());

        let found = backend
            .fetch("Guest", &TenantScope::Platform, rec.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.content, json!({"k": "updated"}));
    }
}
