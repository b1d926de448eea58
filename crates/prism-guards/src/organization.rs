//! Organization role-change validation
//!
//! Shape-identical to the tenant guards, evaluated over organization
//! ranks (owner=4, admin=3, member=2, viewer=1).

use crate::decision::GuardDecision;
use crate::roles::{org_rank, OrgRole, OrgRoleRecord};
use prism_core::{OrganizationId, UserId};

/// Request to change a user's organization role.
#[derive(Debug, Clone)]
pub struct OrgRoleChange<'a> {
    /// User performing the change
    pub actor_id: UserId,
    /// User whose role would change
    pub target_id: UserId,
    /// Organization the change applies to
    pub organization_id: OrganizationId,
    /// The actor's current role records
    pub actor_roles: &'a [OrgRoleRecord],
    /// The target's current role records
    pub target_roles: &'a [OrgRoleRecord],
    /// Role the target would receive
    pub desired_role: OrgRole,
}

/// Request to remove a user's organization role.
#[derive(Debug, Clone)]
pub struct OrgRoleRemoval<'a> {
    /// User performing the removal
    pub actor_id: UserId,
    /// User whose role would be removed
    pub target_id: UserId,
    /// Organization the removal applies to
    pub organization_id: OrganizationId,
    /// The actor's current role records
    pub actor_roles: &'a [OrgRoleRecord],
    /// The target's current role records
    pub target_roles: &'a [OrgRoleRecord],
}

/// Validate an organization role change.
pub fn validate_org_role_change(request: &OrgRoleChange<'_>) -> GuardDecision {
    if request.actor_id == request.target_id {
        return GuardDecision::deny(400, "cannot change your own role");
    }

    let actor_rank = org_rank(request.actor_roles, request.organization_id);
    if request.desired_role.rank() > actor_rank {
        return GuardDecision::deny(403, "cannot grant a role above your own");
    }

    let target_rank = org_rank(request.target_roles, request.organization_id);
    if target_rank > actor_rank {
        return GuardDecision::deny(403, "cannot modify a more privileged user");
    }

    GuardDecision::allow()
}

/// Validate an organization role removal.
pub fn validate_org_role_removal(request: &OrgRoleRemoval<'_>) -> GuardDecision {
    if request.actor_id == request.target_id {
        return GuardDecision::deny(400, "cannot remove your own role");
    }

    let actor_rank = org_rank(request.actor_roles, request.organization_id);
    let target_rank = org_rank(request.target_roles, request.organization_id);
    if target_rank > actor_rank {
        return GuardDecision::deny(403, "cannot modify a more privileged user");
    }

    GuardDecision::allow()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(organization_id: OrganizationId, user_id: UserId, role: OrgRole) -> OrgRoleRecord {
        OrgRoleRecord {
            organization_id,
            user_id,
            role,
        }
    }

    #[test]
    fn test_self_change_rejected() {
        let org = OrganizationId::new();
        let user = UserId::new();
        let roles = [record(org, user, OrgRole::Owner)];

        let decision = validate_org_role_change(&OrgRoleChange {
            actor_id: user,
            target_id: user,
            organization_id: org,
            actor_roles: &roles,
            target_roles: &roles,
            desired_role: OrgRole::Viewer,
        });
        assert_eq!(decision.status(), Some(400));
    }

    #[test]
    fn test_viewer_cannot_promote() {
        let org = OrganizationId::new();
        let viewer = UserId::new();
        let target = UserId::new();
        let actor_roles = [record(org, viewer, OrgRole::Viewer)];
        let target_roles = [record(org, target, OrgRole::Viewer)];

        let decision = validate_org_role_change(&OrgRoleChange {
            actor_id: viewer,
            target_id: target,
            organization_id: org,
            actor_roles: &actor_roles,
            target_roles: &target_roles,
            desired_role: OrgRole::Member,
        });
        assert_eq!(decision.status(), Some(403));
    }

    #[test]
    fn test_admin_manages_members_and_viewers() {
        let org = OrganizationId::new();
        let admin = UserId::new();
        let member = UserId::new();
        let actor_roles = [record(org, admin, OrgRole::Admin)];
        let target_roles = [record(org, member, OrgRole::Member)];

        let change = validate_org_role_change(&OrgRoleChange {
            actor_id: admin,
            target_id: member,
            organization_id: org,
            actor_roles: &actor_roles,
            target_roles: &target_roles,
            desired_role: OrgRole::Viewer,
        });
        assert!(change.is_allowed());

        let removal = validate_org_role_removal(&OrgRoleRemoval {
            actor_id: admin,
            target_id: member,
            organization_id: org,
            actor_roles: &actor_roles,
            target_roles: &target_roles,
        });
        assert!(removal.is_allowed());
    }

    #[test]
    fn test_admin_cannot_touch_owner() {
        let org = OrganizationId::new();
        let admin = UserId::new();
        let owner = UserId::new();
        let actor_roles = [record(org, admin, OrgRole::Admin)];
        let target_roles = [record(org, owner, OrgRole::Owner)];

        let removal = validate_org_role_removal(&OrgRoleRemoval {
            actor_id: admin,
            target_id: owner,
            organization_id: org,
            actor_roles: &actor_roles,
            target_roles: &target_roles,
        });
        assert_eq!(removal.status(), Some(403));
    }
}
