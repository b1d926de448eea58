//! Tenant role-change validation
//!
//! Pure checks over role snapshots the caller supplies. The snapshot
//! should be re-fetched immediately before validate-and-apply; the guard
//! itself holds no state.

use crate::decision::GuardDecision;
use crate::roles::{tenant_rank, TenantRole, TenantRoleRecord};
use prism_core::{TenantId, UserId};

/// Request to change a user's tenant role.
#[derive(Debug, Clone)]
pub struct TenantRoleChange<'a> {
    /// User performing the change
    pub actor_id: UserId,
    /// User whose role would change
    pub target_id: UserId,
    /// Tenant the change applies to
    pub tenant_id: TenantId,
    /// The actor's current role records
    pub actor_roles: &'a [TenantRoleRecord],
    /// The target's current role records
    pub target_roles: &'a [TenantRoleRecord],
    /// Role the target would receive
    pub desired_role: TenantRole,
}

/// Request to remove a user's tenant role.
#[derive(Debug, Clone)]
pub struct TenantRoleRemoval<'a> {
    /// User performing the removal
    pub actor_id: UserId,
    /// User whose role would be removed
    pub target_id: UserId,
    /// Tenant the removal applies to
    pub tenant_id: TenantId,
    /// The actor's current role records
    pub actor_roles: &'a [TenantRoleRecord],
    /// The target's current role records
    pub target_roles: &'a [TenantRoleRecord],
}

/// Validate a tenant role change.
///
/// Checks, in order: the actor is not the target (400); the desired role
/// does not exceed the actor's rank (403); the target does not outrank the
/// actor (403).
pub fn validate_tenant_role_change(request: &TenantRoleChange<'_>) -> GuardDecision {
    if request.actor_id == request.target_id {
        return GuardDecision::deny(400, "cannot change your own role");
    }

    let actor_rank = tenant_rank(request.actor_roles, request.tenant_id);
    if request.desired_role.rank() > actor_rank {
        return GuardDecision::deny(403, "cannot grant a role above your own");
    }

    let target_rank = tenant_rank(request.target_roles, request.tenant_id);
    if target_rank > actor_rank {
        return GuardDecision::deny(403, "cannot modify a more privileged user");
    }

    GuardDecision::allow()
}

/// Validate a tenant role removal.
///
/// Same self and target-rank checks as a change, without a desired-role
/// ceiling. The last-owner check is separate (see [`crate::ownership`]).
pub fn validate_tenant_role_removal(request: &TenantRoleRemoval<'_>) -> GuardDecision {
    if request.actor_id == request.target_id {
        return GuardDecision::deny(400, "cannot remove your own role");
    }

    let actor_rank = tenant_rank(request.actor_roles, request.tenant_id);
    let target_rank = tenant_rank(request.target_roles, request.tenant_id);
    if target_rank > actor_rank {
        return GuardDecision::deny(403, "cannot modify a more privileged user");
    }

    GuardDecision::allow()
}
