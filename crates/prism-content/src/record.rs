//! The polymorphic content record
//!
//! One shape stores every content type on the platform. The `block` tag
//! discriminates the type, `scope` carries tenant ownership, `content` is
//! the schema-validated payload, and `indexer` is a flattened subset of
//! `content` promoted for query filtering.

use prism_core::{RecordId, TenantScope};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single stored content record.
///
/// Records are only ever written through the store, which guarantees the
/// payload validated against the block's definition at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Opaque unique identifier, assigned at creation
    pub id: RecordId,
    /// Content-type tag, e.g. "Assistant" or a tenant-defined name
    pub block: String,
    /// Owning scope
    pub scope: TenantScope,
    /// Link to an owning entity, derived from the definition's parent rule
    pub parent_id: Option<String>,
    /// Schema-validated JSON payload
    pub content: Value,
    /// Flattened subset of `content` used for query predicates
    pub indexer: Map<String, Value>,
    /// Creation time, milliseconds since the Unix epoch
    pub created_at: u64,
    /// Last update time, milliseconds since the Unix epoch
    pub updated_at: u64,
}

impl ContentRecord {
    /// Resolve a dot-separated path inside the content payload.
    ///
    /// `content_field("personality.voice")` reads `content.personality.voice`.
    /// Returns `None` when any segment is missing or a non-object is
    /// traversed.
    pub fn content_field(&self, path: &str) -> Option<&Value> {
        let mut current = &self.content;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

/// Flatten the definition's indexer field list out of a content payload.
///
/// Each listed field is looked up by dot path; missing fields are skipped.
/// The flattened map is keyed by the full path so `personality.voice`
/// stays addressable as one filter key.
pub fn flatten_indexer(fields: &[String], content: &Value) -> Map<String, Value> {
    let mut indexer = Map::new();
    for field in fields {
        let mut current = content;
        let mut found = true;
        for segment in field.split('.') {
            match current.as_object().and_then(|obj| obj.get(segment)) {
                Some(value) => current = value,
                None => {
                    found = false;
                    break;
                }
            }
        }
        if found {
            indexer.insert(field.clone(), current.clone());
        }
    }
    indexer
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with_content(content: Value) -> ContentRecord {
        ContentRecord {
            id: RecordId::new(),
            block: "Assistant".to_string(),
            scope: TenantScope::Platform,
            parent_id: None,
            indexer: Map::new(),
            content,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_content_field_top_level() {
        let record = record_with_content(json!({"name": "Ada"}));
        assert_eq!(record.content_field("name"), Some(&json!("Ada")));
        assert_eq!(record.content_field("missing"), None);
    }

    #[test]
    fn test_content_field_nested_path() {
        let record = record_with_content(json!({
            "personality": {"voice": "calm", "traits": ["curious"]}
        }));
        assert_eq!(
            record.content_field("personality.voice"),
            Some(&json!("calm"))
        );
        assert_eq!(record.content_field("personality.voice.pitch"), None);
    }

    #[test]
    fn test_flatten_indexer_skips_missing() {
        let content = json!({"name": "Ada", "sub_domain": "ada"});
        let fields = vec![
            "name".to_string(),
            "sub_domain".to_string(),
            "absent".to_string(),
        ];
        let indexer = flatten_indexer(&fields, &content);
        assert_eq!(indexer.len(), 2);
        assert_eq!(indexer.get("name"), Some(&json!("Ada")));
        assert_eq!(indexer.get("absent"), None);
    }

    #[test]
    fn test_flatten_indexer_nested_key() {
        let content = json!({"config": {"region": "eu"}});
        let fields = vec!["config.region".to_string()];
        let indexer = flatten_indexer(&fields, &content);
        assert_eq!(indexer.get("config.region"), Some(&json!("eu")));
    }
}
