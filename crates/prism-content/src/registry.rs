//! Definition registry
//!
//! Resolves content definitions for the store. Two sources feed a lookup:
//! the explicitly-installed platform set, and definitions persisted as
//! `DynamicContent` records in the backend.
//!
//! Scope handling is the load-bearing part. Tenant-scoped lookups check
//! the tenant's own stored definitions first and then fall back ("squash")
//! to platform definitions, so built-in types work for every tenant.
//! Platform-scoped lookups only ever see platform definitions: there is no
//! wildcard that lets a lookup without a tenant id resolve some tenant's
//! custom definition.

use crate::backend::RecordBackend;
use crate::definition::{ContentDefinition, DEFINITION_BLOCK};
use crate::error::{ContentError, ContentResult};
use crate::platform::PlatformDefinitions;
use crate::record::{flatten_indexer, ContentRecord};
use crate::validator::SchemaValidator;
use prism_core::{Clock, RecordId, TenantScope};
use std::sync::Arc;
use tracing::{info, warn};

/// Indexer fields promoted for stored definition records.
const DEFINITION_INDEXER: [&str; 2] = ["name", "data_model.block"];

/// Registry of content-type definitions.
pub struct DefinitionRegistry {
    backend: Arc<dyn RecordBackend>,
    platform: Arc<PlatformDefinitions>,
    clock: Arc<dyn Clock>,
}

impl DefinitionRegistry {
    /// Create a registry over a backend and an installed platform set
    pub fn new(
        backend: Arc<dyn RecordBackend>,
        platform: Arc<PlatformDefinitions>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            backend,
            platform,
            clock,
        }
    }

    /// Register a new definition in the given scope.
    ///
    /// The definition's schema is compiled up front so a broken schema can
    /// never be stored. Fails with [`ContentError::DuplicateDefinition`]
    /// when the block is already defined in the scope (for the platform
    /// scope this includes the built-in set).
    pub async fn create(
        &self,
        definition: ContentDefinition,
        scope: TenantScope,
    ) -> ContentResult<ContentRecord> {
        let block = definition.block().to_string();

        SchemaValidator::new(&block, &definition.data_model.json_schema)?;

        let exists = match &scope {
            TenantScope::Platform => {
                self.platform.contains(&block) || self.lookup_stored(&block, &scope).await?.is_some()
            }
            TenantScope::Tenant { .. } => self.lookup_stored(&block, &scope).await?.is_some(),
        };
        if exists {
            return Err(ContentError::duplicate_definition(block, scope));
        }

        let content = serde_json::to_value(&definition)
            .map_err(|e| ContentError::backend(e.to_string()))?;
        let indexer_fields: Vec<String> =
            DEFINITION_INDEXER.iter().map(|s| s.to_string()).collect();
        let now = self.clock.now_ms().await;
        let record = ContentRecord {
            id: RecordId::new(),
            block: DEFINITION_BLOCK.to_string(),
            scope,
            parent_id: None,
            indexer: flatten_indexer(&indexer_fields, &content),
            content,
            created_at: now,
            updated_at: now,
        };
        self.backend.insert(record.clone()).await?;
        info!(block = %block, scope = %scope, "registered content definition");
        Ok(record)
    }

    /// Resolve the definition for a block within a scope.
    ///
    /// The caller's scope is applied literally. A tenant scope squashes to
    /// the platform set when the tenant has no definition of its own; the
    /// platform scope never sees tenant definitions.
    pub async fn find(&self, block: &str, scope: &TenantScope) -> ContentResult<ContentDefinition> {
        match scope {
            TenantScope::Tenant { .. } => {
                if let Some(definition) = self.lookup_stored(block, scope).await? {
                    return Ok(definition);
                }
                self.lookup_platform(block)
                    .await?
                    .ok_or_else(|| ContentError::definition_not_found(block, *scope))
            }
            TenantScope::Platform => self
                .lookup_platform(block)
                .await?
                .ok_or_else(|| ContentError::definition_not_found(block, *scope)),
        }
    }

    /// Platform definitions: the installed set first, then platform-stored
    /// `DynamicContent` records.
    async fn lookup_platform(&self, block: &str) -> ContentResult<Option<ContentDefinition>> {
        if let Some(definition) = self.platform.get(block) {
            return Ok(Some(definition.clone()));
        }
        self.lookup_stored(block, &TenantScope::Platform).await
    }

    /// Stored definitions in exactly the given scope.
    async fn lookup_stored(
        &self,
        block: &str,
        scope: &TenantScope,
    ) -> ContentResult<Option<ContentDefinition>> {
        let rows = self.backend.scan(DEFINITION_BLOCK, scope).await?;
        for row in rows {
            match serde_json::from_value::<ContentDefinition>(row.content.clone()) {
                Ok(definition) if definition.block() == block => return Ok(Some(definition)),
                Ok(_) => {}
                Err(err) => {
                    warn!(record = %row.id, %err, "skipping malformed definition record");
                }
            }
        }
        Ok(None)
    }
}
