//! Tenant scoping for content and definition lookups
//!
//! The record table is shared across all tenants, so every read and write
//! carries a `TenantScope`. Platform-wide content (built-in definitions,
//! tenant-agnostic types) lives under `Platform`; everything a tenant owns
//! lives under `Tenant(id)`.
//!
//! There is deliberately no "any tenant" wildcard variant. A tenant-scoped
//! lookup can only ever see that tenant's rows, and a platform lookup can
//! only ever see platform rows. Code that wants the platform fallback for
//! definition resolution does so with an explicit second lookup.

use crate::identifiers::TenantId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ownership scope for a content record or definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TenantScope {
    /// Platform-wide: visible to every tenant, owned by none.
    Platform,
    /// Owned by a single tenant.
    Tenant {
        /// The owning tenant
        id: TenantId,
    },
}

impl TenantScope {
    /// Scope owned by the given tenant
    pub fn tenant(id: TenantId) -> Self {
        Self::Tenant { id }
    }

    /// True for the platform-wide scope
    pub fn is_platform(&self) -> bool {
        matches!(self, Self::Platform)
    }

    /// The owning tenant, if any
    pub fn tenant_id(&self) -> Option<TenantId> {
        match self {
            Self::Platform => None,
            Self::Tenant { id } => Some(*id),
        }
    }
}

impl fmt::Display for TenantScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Platform => write!(f, "platform"),
            Self::Tenant { id } => write!(f, "{id}"),
        }
    }
}

impl From<TenantId> for TenantScope {
    fn from(id: TenantId) -> Self {
        Self::Tenant { id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_scope() {
        let scope = TenantScope::Platform;
        assert!(scope.is_platform());
        assert_eq!(scope.tenant_id(), None);
        assert_eq!(scope.to_string(), "platform");
    }

    #[test]
    fn test_tenant_scope() {
        let id = TenantId::new();
        let scope = TenantScope::tenant(id);
        assert!(!scope.is_platform());
        assert_eq!(scope.tenant_id(), Some(id));
        assert_eq!(TenantScope::from(id), scope);
    }

    #[test]
    fn test_scopes_are_distinct() {
        let a = TenantScope::tenant(TenantId::new());
        let b = TenantScope::tenant(TenantId::new());
        assert_ne!(a, b);
        assert_ne!(a, TenantScope::Platform);
    }
}
