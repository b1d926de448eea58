//! Platform-wide built-in definitions
//!
//! The platform ships a small set of content types every tenant can use
//! without registering anything. They are held in an explicitly-constructed
//! [`PlatformDefinitions`] set that is passed to the registry at
//! construction time; there is no lazily-initialized global.

use crate::definition::{ContentDefinition, DEFINITION_BLOCK};
use serde_json::json;
use std::collections::HashMap;

/// The set of platform-wide definitions, keyed by block tag.
#[derive(Debug, Clone, Default)]
pub struct PlatformDefinitions {
    definitions: HashMap<String, ContentDefinition>,
}

impl PlatformDefinitions {
    /// An empty set. Useful for tests that want full control.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard platform set: `DynamicContent`, `Tenant`, `User`,
    /// `Assistant`.
    pub fn standard() -> Self {
        let mut set = Self::default();
        set.install(meta_definition());
        set.install(tenant_definition());
        set.install(user_definition());
        set.install(assistant_definition());
        set
    }

    /// Add a definition to the set, replacing any previous one for the
    /// same block.
    pub fn install(&mut self, definition: ContentDefinition) {
        self.definitions
            .insert(definition.block().to_string(), definition);
    }

    /// Look up a platform definition by block tag
    pub fn get(&self, block: &str) -> Option<&ContentDefinition> {
        self.definitions.get(block)
    }

    /// True if a platform definition exists for the block
    pub fn contains(&self, block: &str) -> bool {
        self.definitions.contains_key(block)
    }

    /// Number of installed definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// True when no definitions are installed
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Definition describing definitions themselves.
///
/// Keeps the invariant that every stored record's block has a definition:
/// definition records are `DynamicContent` records, and `DynamicContent`
/// is described here.
fn meta_definition() -> ContentDefinition {
    ContentDefinition::new(
        "Dynamic Content",
        DEFINITION_BLOCK,
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "description": {"type": "string"},
                "data_model": {"type": "object"},
                "ui_config": {},
                "access": {}
            },
            "required": ["name", "data_model"],
            "additionalProperties": false
        }),
    )
    .with_description("Describes a dynamically registered content type")
    .with_indexer(["name", "data_model.block"])
}

fn tenant_definition() -> ContentDefinition {
    ContentDefinition::new(
        "Tenant",
        "Tenant",
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "sub_domain": {"type": "string"},
                "status": {"type": "string", "enum": ["active", "suspended"]}
            },
            "required": ["name"],
            "additionalProperties": false
        }),
    )
    .with_description("A platform tenant")
    .with_indexer(["name", "sub_domain"])
}

fn user_definition() -> ContentDefinition {
    ContentDefinition::new(
        "User",
        "User",
        json!({
            "type": "object",
            "properties": {
                "email": {"type": "string"},
                "name": {"type": "string"},
                "status": {"type": "string", "enum": ["invited", "active", "disabled"]}
            },
            "required": ["email"],
            "additionalProperties": false
        }),
    )
    .with_description("A platform user account")
    .with_indexer(["email"])
}

fn assistant_definition() -> ContentDefinition {
    ContentDefinition::new(
        "Assistant",
        "Assistant",
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "sub_domain": {"type": "string"},
                "personality": {"type": "object"},
                "status": {"type": "string"}
            },
            "required": ["name"],
            "additionalProperties": false
        }),
    )
    .with_description("A tenant-facing assistant configuration")
    .with_indexer(["name", "sub_domain"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set() {
        let set = PlatformDefinitions::standard();
        assert_eq!(set.len(), 4);
        assert!(set.contains(DEFINITION_BLOCK));
        assert!(set.contains("Tenant"));
        assert!(set.contains("User"));
        assert!(set.contains("Assistant"));
        assert!(!set.contains("Guest"));
    }

    #[test]
    fn test_empty_set() {
        let set = PlatformDefinitions::empty();
        assert!(set.is_empty());
        assert_eq!(set.get("Tenant"), None);
    }

    #[test]
    fn test_install_replaces() {
        let mut set = PlatformDefinitions::empty();
        set.install(tenant_definition());
        let replacement =
            ContentDefinition::new("Tenant v2", "Tenant", serde_json::json!({"type": "object"}));
        set.install(replacement);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("Tenant").map(|d| d.name.as_str()), Some("Tenant v2"));
    }
}
