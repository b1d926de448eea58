//! The Prism content store
//!
//! Tenant-scoped CRUD and query over the polymorphic record table. Every
//! write resolves the block's definition, validates the payload against its
//! schema, and derives the indexer and parent linkage before anything is
//! persisted. A validation failure aborts the whole write.

use crate::backend::{MemoryRecordBackend, RecordBackend};
use crate::definition::ContentDefinition;
use crate::error::{ContentError, ContentResult, Violation};
use crate::platform::PlatformDefinitions;
use crate::query::{Page, Query};
use crate::record::{flatten_indexer, ContentRecord};
use crate::registry::DefinitionRegistry;
use crate::validator::SchemaValidator;
use prism_core::{Clock, RecordId, SystemClock, TenantScope};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// The schema-driven content engine.
///
/// All operations are async and tenant-scoped. The scope a caller passes
/// is the scope that reaches the definition lookup and the backend; the
/// store never widens it.
pub struct Prism {
    backend: Arc<dyn RecordBackend>,
    registry: DefinitionRegistry,
    clock: Arc<dyn Clock>,
}

impl Prism {
    /// Create a store over a backend, a platform definition set, and a clock
    pub fn new(
        backend: Arc<dyn RecordBackend>,
        platform: PlatformDefinitions,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let registry =
            DefinitionRegistry::new(backend.clone(), Arc::new(platform), clock.clone());
        Self {
            backend,
            registry,
            clock,
        }
    }

    /// In-memory store with the standard platform set and the system clock
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryRecordBackend::new()),
            PlatformDefinitions::standard(),
            Arc::new(SystemClock::new()),
        )
    }

    /// The definition registry backing this store
    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    /// Register a content definition in the given scope.
    pub async fn create_definition(
        &self,
        definition: ContentDefinition,
        scope: TenantScope,
    ) -> ContentResult<Page<ContentRecord>> {
        let record = self.registry.create(definition, scope).await?;
        Ok(Page::single(record))
    }

    /// Resolve the definition for a block within a scope.
    pub async fn find_definition(
        &self,
        block: &str,
        scope: &TenantScope,
    ) -> ContentResult<ContentDefinition> {
        self.registry.find(block, scope).await
    }

    /// Create a content record.
    ///
    /// Validates `data` against the block's schema, derives the parent id
    /// and indexer from the definition, and persists with fresh id and
    /// timestamps. Nothing is written when validation fails.
    pub async fn create(
        &self,
        block: &str,
        data: Value,
        scope: TenantScope,
    ) -> ContentResult<Page<ContentRecord>> {
        let definition = self.registry.find(block, &scope).await?;
        let validator = SchemaValidator::new(block, &definition.data_model.json_schema)?;
        validator.validate(block, &data)?;

        let now = self.clock.now_ms().await;
        let record = ContentRecord {
            id: RecordId::new(),
            block: block.to_string(),
            scope,
            parent_id: definition.data_model.parent.parent_of(&data),
            indexer: flatten_indexer(&definition.data_model.indexer, &data),
            content: data,
            created_at: now,
            updated_at: now,
        };
        self.backend.insert(record.clone()).await?;
        debug!(block, scope = %scope, id = %record.id, "created content record");
        Ok(Page::single(record))
    }

    /// Query content records.
    ///
    /// The query's scope is applied literally to both the definition lookup
    /// and the backend scan. `total` counts matches before pagination.
    pub async fn query(&self, query: Query) -> ContentResult<Page<ContentRecord>> {
        self.registry.find(&query.block, &query.scope).await?;
        let rows = self.backend.scan(&query.block, &query.scope).await?;
        Ok(query.apply(rows))
    }

    /// Update a content record by shallow merge.
    ///
    /// Top-level fields of `patch` replace the stored fields; everything
    /// else is preserved. Nested objects are replaced whole, not
    /// deep-merged. The merged payload is re-validated and the indexer and
    /// parent linkage recomputed before the row is replaced.
    pub async fn update(
        &self,
        block: &str,
        id: RecordId,
        patch: Value,
        scope: TenantScope,
    ) -> ContentResult<Page<ContentRecord>> {
        let definition = self.registry.find(block, &scope).await?;
        let mut record = self
            .backend
            .fetch(block, &scope, id)
            .await?
            .ok_or_else(|| ContentError::record_not_found(block, id, scope))?;

        let merged = shallow_merge(block, record.content, patch)?;
        let validator = SchemaValidator::new(block, &definition.data_model.json_schema)?;
        validator.validate(block, &merged)?;

        record.parent_id = definition.data_model.parent.parent_of(&merged);
        record.indexer = flatten_indexer(&definition.data_model.indexer, &merged);
        record.content = merged;
        record.updated_at = self.clock.now_ms().await;

        if !self.backend.replace(record.clone()).await? {
            return Err(ContentError::record_not_found(block, id, scope));
        }
        debug!(block, scope = %scope, id = %record.id, "updated content record");
        Ok(Page::single(record))
    }

    /// Delete a content record.
    ///
    /// Returns `false` when no record matches the (block, id, scope)
    /// triple.
    pub async fn delete(
        &self,
        block: &str,
        id: RecordId,
        scope: TenantScope,
    ) -> ContentResult<bool> {
        self.registry.find(block, &scope).await?;
        let removed = self.backend.remove(block, &scope, id).await?;
        if removed {
            debug!(block, scope = %scope, id = %id, "deleted content record");
        }
        Ok(removed)
    }
}

/// Merge a patch into an existing payload, shallowly.
///
/// Both sides must be JSON objects; the patch's top-level entries replace
/// the existing ones wholesale.
fn shallow_merge(block: &str, existing: Value, patch: Value) -> ContentResult<Value> {
    let patch = match patch {
        Value::Object(map) => map,
        _ => {
            return Err(ContentError::validation(
                block,
                vec![Violation::new("", "update patch must be a JSON object")],
            ))
        }
    };
    // Non-object payloads (allowed by permissive schemas) are replaced
    // outright rather than merged.
    let mut merged = match existing {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    for (key, value) in patch {
        merged.insert(key, value);
    }
    Ok(Value::Object(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shallow_merge_preserves_other_fields() {
        let existing = json!({"name": "Old", "sub_domain": "x"});
        let patch = json!({"name": "NewName"});
        let merged = shallow_merge("Assistant", existing, patch).unwrap();
        assert_eq!(merged, json!({"name": "NewName", "sub_domain": "x"}));
    }

    #[test]
    fn test_shallow_merge_replaces_nested_whole() {
        let existing = json!({"config": {"a": 1, "b": 2}});
        let patch = json!({"config": {"a": 9}});
        let merged = shallow_merge("Assistant", existing, patch).unwrap();
        assert_eq!(merged, json!({"config": {"a": 9}}));
    }

    #[test]
    fn test_shallow_merge_rejects_non_object_patch() {
        let err = shallow_merge("Assistant", json!({}), json!([1, 2])).unwrap_err();
        assert!(matches!(err, ContentError::Validation { .. }));
    }
}
