//! Content definitions
//!
//! A definition describes a content type: its JSON Schema, which fields are
//! promoted into the indexer, and how records link to a parent entity.
//! Definitions are themselves stored as content records under the
//! [`DEFINITION_BLOCK`] type, so the record table stays fully polymorphic.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Block tag under which definitions themselves are stored.
pub const DEFINITION_BLOCK: &str = "DynamicContent";

/// How a record of this type links to an owning entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ParentRule {
    /// Top-level type, no parent
    #[default]
    None,
    /// Every record links to one fixed parent id
    Fixed {
        /// The fixed parent id
        id: String,
    },
    /// The parent id is read from a named content field
    Field {
        /// Content field holding the parent id, e.g. "assistant_id"
        field: String,
    },
}

impl ParentRule {
    /// Derive the parent id for a content payload under this rule.
    ///
    /// `Field` rules accept string and integer field values; anything else
    /// yields no parent.
    pub fn parent_of(&self, content: &Value) -> Option<String> {
        match self {
            Self::None => None,
            Self::Fixed { id } => Some(id.clone()),
            Self::Field { field } => match content.get(field.as_str()) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            },
        }
    }
}

/// Storage shape of a content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataModel {
    /// Content-type tag; unique per scope
    pub block: String,
    /// JSON Schema every payload of this type must satisfy
    pub json_schema: Value,
    /// Content fields (dot paths) flattened into the indexer
    #[serde(default)]
    pub indexer: Vec<String>,
    /// Parent linkage rule
    #[serde(default)]
    pub parent: ParentRule,
}

/// A stored content-type definition.
///
/// `ui_config` and `access` are presentational and authorization hints for
/// callers; the store itself never interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDefinition {
    /// Display name of the type
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Storage shape: schema, indexer, parent linkage
    pub data_model: DataModel,
    /// Presentation hints consumed by UI callers
    #[serde(default)]
    pub ui_config: Value,
    /// Authorization hints consumed by route-handler callers
    #[serde(default)]
    pub access: Value,
}

impl ContentDefinition {
    /// Create a definition with the given block tag and schema.
    pub fn new(name: impl Into<String>, block: impl Into<String>, json_schema: Value) -> Self {
        let name = name.into();
        Self {
            name,
            description: String::new(),
            data_model: DataModel {
                block: block.into(),
                json_schema,
                indexer: Vec::new(),
                parent: ParentRule::None,
            },
            ui_config: Value::Null,
            access: Value::Null,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the indexer field list
    pub fn with_indexer<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_model.indexer = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the parent linkage rule
    pub fn with_parent(mut self, parent: ParentRule) -> Self {
        self.data_model.parent = parent;
        self
    }

    /// The block tag this definition describes
    pub fn block(&self) -> &str {
        &self.data_model.block
    }
}
