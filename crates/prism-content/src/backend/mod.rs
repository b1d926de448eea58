//! Storage backend seam for the content store
//!
//! The store talks to persistence through [`RecordBackend`]. Every method
//! is keyed by `(block, scope)` so tenant isolation holds below the filter
//! layer: a backend physically cannot answer a scan for one scope with
//! another scope's rows.

mod memory;

pub use memory::MemoryRecordBackend;

use crate::error::ContentResult;
use crate::record::ContentRecord;
use async_trait::async_trait;
use prism_core::{RecordId, TenantScope};

/// Async persistence for content records.
#[async_trait]
pub trait RecordBackend: Send + Sync {
    /// Insert a new record
    async fn insert(&self, record: ContentRecord) -> ContentResult<()>;

    /// Fetch one record by its (block, scope, id) key
    async fn fetch(
        &self,
        block: &str,
        scope: &TenantScope,
        id: RecordId,
    ) -> ContentResult<Option<ContentRecord>>;

    /// All records of a block within a scope
    async fn scan(&self, block: &str, scope: &TenantScope) -> ContentResult<Vec<ContentRecord>>;

    /// Replace an existing record; returns false when no row matched
    async fn replace(&self, record: ContentRecord) -> ContentResult<bool>;

    /// Remove a record; returns false when no row matched
    async fn remove(
        &self,
        block: &str,
        scope: &TenantScope,
        id: RecordId,
    ) -> ContentResult<bool>;
}
