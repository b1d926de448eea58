//! Last-owner protection
//!
//! The sole remaining owner of a tenant or organization can never be
//! demoted or removed, no matter what the rank checks say. Callers run
//! this check against the full role set of the scope, re-fetched
//! immediately before applying the change.

use crate::decision::GuardDecision;
use crate::roles::{OrgRole, OrgRoleRecord, TenantRole, TenantRoleRecord};
use prism_core::{OrganizationId, TenantId, UserId};

/// Denial reason for last-owner violations.
pub const LAST_OWNER_REASON: &str = "cannot remove or demote the last OWNER";

/// Check that demoting or removing `target_id` leaves the tenant with at
/// least one owner.
///
/// `roles` must be the full role set of the tenant, not just the target's
/// records. Targets that are not owners always pass.
pub fn check_tenant_owner_remains(
    roles: &[TenantRoleRecord],
    tenant_id: TenantId,
    target_id: UserId,
) -> GuardDecision {
    let target_is_owner = roles.iter().any(|record| {
        record.tenant_id == tenant_id
            && record.user_id == target_id
            && record.role == TenantRole::Owner
    });
    if !target_is_owner {
        return GuardDecision::allow();
    }

    let remaining = roles.iter().any(|record| {
        record.tenant_id == tenant_id
            && record.role == TenantRole::Owner
            && record.user_id != target_id
    });
    if remaining {
        GuardDecision::allow()
    } else {
        GuardDecision::deny(400, LAST_OWNER_REASON)
    }
}

/// Organization variant of [`check_tenant_owner_remains`].
pub fn check_org_owner_remains(
    roles: &[OrgRoleRecord],
    organization_id: OrganizationId,
    target_id: UserId,
) -> GuardDecision {
    let target_is_owner = roles.iter().any(|record| {
        record.organization_id == organization_id
            && record.user_id == target_id
            && record.role == OrgRole::Owner
    });
    if !target_is_owner {
        return GuardDecision::allow();
    }

    let remaining = roles.iter().any(|record| {
        record.organization_id == organization_id
            && record.role == OrgRole::Owner
            && record.user_id != target_id
    });
    if remaining {
        GuardDecision::allow()
    } else {
        GuardDecision::deny(400, LAST_OWNER_REASON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant_record(tenant_id: TenantId, user_id: UserId, role: TenantRole) -> TenantRoleRecord {
        TenantRoleRecord {
            tenant_id,
            user_id,
            role,
        }
    }

    #[test]
    fn test_sole_owner_protected() {
        let tenant = TenantId::new();
        let owner = UserId::new();
        let roles = [
            tenant_record(tenant, owner, TenantRole::Owner),
            tenant_record(tenant, UserId::new(), TenantRole::Admin),
        ];

        let decision = check_tenant_owner_remains(&roles, tenant, owner);
        assert_eq!(decision.status(), Some(400));
        assert_eq!(decision.reason(), Some(LAST_OWNER_REASON));
    }

    #[test]
    fn test_second_owner_unblocks_removal() {
        let tenant = TenantId::new();
        let u1 = UserId::new();
        let u2 = UserId::new();
        let roles = [
            tenant_record(tenant, u1, TenantRole::Owner),
            tenant_record(tenant, u2, TenantRole::Owner),
        ];

        assert!(check_tenant_owner_remains(&roles, tenant, u1).is_allowed());
        assert!(check_tenant_owner_remains(&roles, tenant, u2).is_allowed());
    }

    #[test]
    fn test_non_owner_target_always_passes() {
        let tenant = TenantId::new();
        let owner = UserId::new();
        let member = UserId::new();
        let roles = [
            tenant_record(tenant, owner, TenantRole::Owner),
            tenant_record(tenant, member, TenantRole::Member),
        ];

        assert!(check_tenant_owner_remains(&roles, tenant, member).is_allowed());
    }

    #[test]
    fn test_owner_elsewhere_does_not_shield() {
        // Target owns a different tenant; in this tenant they are the sole
        // owner and stay protected.
        let tenant = TenantId::new();
        let elsewhere = TenantId::new();
        let owner = UserId::new();
        let roles = [
            tenant_record(tenant, owner, TenantRole::Owner),
            tenant_record(elsewhere, owner, TenantRole::Owner),
            tenant_record(elsewhere, UserId::new(), TenantRole::Owner),
        ];

        assert!(check_tenant_owner_remains(&roles, tenant, owner).is_denied());
        assert!(check_tenant_owner_remains(&roles, elsewhere, owner).is_allowed());
    }

    #[test]
    fn test_org_sole_owner_protected() {
        let org = OrganizationId::new();
        let owner = UserId::new();
        let roles = [
            OrgRoleRecord {
                organization_id: org,
                user_id: owner,
                role: OrgRole::Owner,
            },
            OrgRoleRecord {
                organization_id: org,
                user_id: UserId::new(),
                role: OrgRole::Viewer,
            },
        ];

        assert!(check_org_owner_remains(&roles, org, owner).is_denied());

        let viewer = roles[1].user_id;
        assert!(check_org_owner_remains(&roles, org, viewer).is_allowed());
    }
}
