//! Role types, role records, and rank computation
//!
//! Ranks impose a total order over role names. Rank 0 means "no role in
//! this scope" and is what every privilege comparison bottoms out at.

use prism_core::{OrganizationId, TenantId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user holds within a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TenantRole {
    /// Read/write member
    Member,
    /// Administrator
    Admin,
    /// Tenant owner
    Owner,
}

impl TenantRole {
    /// Privilege rank: owner=3, admin=2, member=1
    pub fn rank(&self) -> u8 {
        match self {
            Self::Owner => 3,
            Self::Admin => 2,
            Self::Member => 1,
        }
    }
}

impl fmt::Display for TenantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "OWNER"),
            Self::Admin => write!(f, "ADMIN"),
            Self::Member => write!(f, "MEMBER"),
        }
    }
}

/// Role a user holds within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrgRole {
    /// Read-only access
    Viewer,
    /// Read/write member
    Member,
    /// Administrator
    Admin,
    /// Organization owner
    Owner,
}

impl OrgRole {
    /// Privilege rank: owner=4, admin=3, member=2, viewer=1
    pub fn rank(&self) -> u8 {
        match self {
            Self::Owner => 4,
            Self::Admin => 3,
            Self::Member => 2,
            Self::Viewer => 1,
        }
    }
}

impl fmt::Display for OrgRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "OWNER"),
            Self::Admin => write!(f, "ADMIN"),
            Self::Member => write!(f, "MEMBER"),
            Self::Viewer => write!(f, "VIEWER"),
        }
    }
}

/// A user's role within one tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRoleRecord {
    /// The tenant the role applies to
    pub tenant_id: TenantId,
    /// The user holding the role
    pub user_id: UserId,
    /// The role held
    pub role: TenantRole,
}

/// A user's role within one organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgRoleRecord {
    /// The organization the role applies to
    pub organization_id: OrganizationId,
    /// The user holding the role
    pub user_id: UserId,
    /// The role held
    pub role: OrgRole,
}

/// Highest tenant rank the given role records confer within a tenant.
///
/// Records for other tenants are ignored; an empty or foreign-only list
/// ranks 0.
pub fn tenant_rank(roles: &[TenantRoleRecord], tenant_id: TenantId) -> u8 {
    roles
        .iter()
        .filter(|record| record.tenant_id == tenant_id)
        .map(|record| record.role.rank())
        .max()
        .unwrap_or(0)
}

/// Highest organization rank the given role records confer within an
/// organization.
pub fn org_rank(roles: &[OrgRoleRecord], organization_id: OrganizationId) -> u8 {
    roles
        .iter()
        .filter(|record| record.organization_id == organization_id)
        .map(|record| record.role.rank())
        .max()
        .unwrap_or(0)
}
