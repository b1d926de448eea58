//! Prism Role Guards
//!
//! Pure authorization decisions for tenant and organization role changes.
//! Every function here is synchronous and side-effect free: callers prepare
//! a snapshot of the relevant role records, the guard evaluates it, and the
//! returned [`GuardDecision`] maps directly onto a transport status code.
//! Guards never touch storage and never return errors.
//!
//! Callers own two responsibilities the guards cannot:
//! re-fetching role snapshots immediately before validate-and-apply (to
//! narrow races), and running the last-owner check against the full role
//! set of the scope (see [`ownership`]).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Allow/deny decision values
pub mod decision;

/// Organization role-change validation
pub mod organization;

/// Last-owner protection
pub mod ownership;

/// Role types, role records, and rank computation
pub mod roles;

/// Tenant role-change validation
pub mod tenant;

pub use decision::GuardDecision;
pub use organization::{
    validate_org_role_change, validate_org_role_removal, OrgRoleChange, OrgRoleRemoval,
};
pub use ownership::{check_org_owner_remains, check_tenant_owner_remains, LAST_OWNER_REASON};
pub use roles::{org_rank, tenant_rank, OrgRole, OrgRoleRecord, TenantRole, TenantRoleRecord};
pub use tenant::{
    validate_tenant_role_change, validate_tenant_role_removal, TenantRoleChange, TenantRoleRemoval,
};
