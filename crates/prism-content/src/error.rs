//! Content engine error types

use prism_core::{RecordId, TenantScope};
use std::fmt;
use thiserror::Error;

/// A single schema violation with the JSON path it occurred at.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Violation {
    /// JSON pointer to the offending value ("" for the document root)
    pub path: String,
    /// Human-readable description of the violation
    pub message: String,
}

impl Violation {
    /// Create a new violation
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Errors from content store and registry operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContentError {
    /// No definition registered for the requested block in the given scope.
    ///
    /// Recoverable: callers may create the definition and retry once.
    #[error("no definition for block {block} in scope {scope}")]
    DefinitionNotFound {
        /// The requested block type
        block: String,
        /// The scope the lookup ran under
        scope: TenantScope,
    },

    /// A definition for this block already exists in the given scope.
    #[error("definition for block {block} already exists in scope {scope}")]
    DuplicateDefinition {
        /// The conflicting block type
        block: String,
        /// The scope the definition was registered under
        scope: TenantScope,
    },

    /// The definition's JSON Schema does not compile.
    #[error("invalid JSON schema for block {block}: {message}")]
    InvalidSchema {
        /// The block the schema belongs to
        block: String,
        /// Description of the schema error
        message: String,
    },

    /// The payload does not conform to the block's schema.
    ///
    /// Nothing is persisted when validation fails.
    #[error("invalid payload for block {block} ({count} violations)", count = .violations.len())]
    Validation {
        /// The block the payload was checked against
        block: String,
        /// Path-addressed violations
        violations: Vec<Violation>,
    },

    /// No record matches the (block, id, scope) triple.
    #[error("no {block} record {id} in scope {scope}")]
    RecordNotFound {
        /// The block type
        block: String,
        /// The record id
        id: RecordId,
        /// The scope the lookup ran under
        scope: TenantScope,
    },

    /// The storage backend failed.
    #[error("storage backend failure: {message}")]
    Backend {
        /// Description of the backend failure
        message: String,
    },
}

impl ContentError {
    /// Create a definition-not-found error
    pub fn definition_not_found(block: impl Into<String>, scope: TenantScope) -> Self {
        Self::DefinitionNotFound {
            block: block.into(),
            scope,
        }
    }

    /// Create a duplicate-definition error
    pub fn duplicate_definition(block: impl Into<String>, scope: TenantScope) -> Self {
        Self::DuplicateDefinition {
            block: block.into(),
            scope,
        }
    }

    /// Create an invalid-schema error
    pub fn invalid_schema(block: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            block: block.into(),
            message: message.into(),
        }
    }

    /// Create a validation error from a set of violations
    pub fn validation(block: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self::Validation {
            block: block.into(),
            violations,
        }
    }

    /// Create a record-not-found error
    pub fn record_not_found(block: impl Into<String>, id: RecordId, scope: TenantScope) -> Self {
        Self::RecordNotFound {
            block: block.into(),
            id,
            scope,
        }
    }

    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// True when the error is the recoverable missing-definition case
    pub fn is_definition_not_found(&self) -> bool {
        matches!(self, Self::DefinitionNotFound { .. })
    }

    /// The violations carried by a validation error, if any
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation { violations, .. } => violations,
            _ => &[],
        }
    }
}

/// Result type for content engine operations
pub type ContentResult<T> = Result<T, ContentError>;
