use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use orgdesk_acl::{GrantStore, Permission, ResourceId};
use orgdesk_core::{OrganizationId, UserId};

use crate::member::Member;
use crate::organization::Organization;

/// Membership failure, reported distinctly so callers can pick cleanup
/// behavior (e.g. stale-invitation deletion on [`MembershipError::AlreadyMember`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// Organization representative can not be its member.
    #[error("organization representative can not be its member")]
    IsRepresentative,

    /// The (user, organization) pair already exists.
    #[error("user is already a member of the organization")]
    AlreadyMember,
}

/// Tracks which users belong to which organizations.
///
/// Membership changes carry derived ACL side effects as part of the operation
/// itself, not an out-of-band listener: joining grants `view_organization` and
/// `view_member` on the organization, leaving revokes both. The side effects
/// run under the registry's write lock, so any caller that observes a member
/// row also observes its grants.
pub struct MembershipRegistry {
    members: RwLock<HashMap<(UserId, OrganizationId), Member>>,
    grants: Arc<dyn GrantStore>,
}

impl MembershipRegistry {
    pub fn new(grants: Arc<dyn GrantStore>) -> Self {
        Self {
            members: RwLock::new(HashMap::new()),
            grants,
        }
    }

    /// Add a user to an organization.
    ///
    /// Validation order matters: the representative check is reported as
    /// [`MembershipError::IsRepresentative`], never disguised as a uniqueness
    /// violation. The (user, organization) map entry is the authoritative
    /// arbiter for concurrent callers; the loser observes `AlreadyMember`.
    pub fn add_member(
        &self,
        user: UserId,
        organization: &Organization,
    ) -> Result<Member, MembershipError> {
        if user == organization.representative() {
            return Err(MembershipError::IsRepresentative);
        }

        let org_id = organization.id_typed();
        let mut members = match self.members.write() {
            Ok(m) => m,
            Err(poisoned) => poisoned.into_inner(),
        };

        if members.contains_key(&(user, org_id)) {
            return Err(MembershipError::AlreadyMember);
        }

        let member = Member::new(user, org_id);
        members.insert((user, org_id), member.clone());

        let resource = ResourceId::Organization(org_id);
        self.grants.grant(user, resource, Permission::VIEW_ORGANIZATION);
        self.grants.grant(user, resource, Permission::VIEW_MEMBER);

        tracing::debug!(%user, organization = %org_id, "member joined");
        Ok(member)
    }

    /// Remove a member and revoke its derived grants.
    ///
    /// Revocation is unconditional and idempotent: it happens even if the row
    /// was already gone, so no orphaned grants survive membership removal.
    pub fn remove_member(&self, member: &Member) {
        let key = (member.user_id, member.organization_id);
        let mut members = match self.members.write() {
            Ok(m) => m,
            Err(poisoned) => poisoned.into_inner(),
        };
        members.remove(&key);

        self.revoke_derived_grants(member.user_id, member.organization_id);
        tracing::debug!(user = %member.user_id, organization = %member.organization_id, "member removed");
    }

    /// Cascade helper: drop every membership of a user (account deletion).
    pub fn remove_user(&self, user: UserId) {
        for member in self.drain_members(|m| m.user_id == user) {
            self.revoke_derived_grants(member.user_id, member.organization_id);
        }
    }

    /// Cascade helper: drop every membership of an organization (org deletion).
    pub fn remove_organization(&self, organization: OrganizationId) {
        for member in self.drain_members(|m| m.organization_id == organization) {
            self.revoke_derived_grants(member.user_id, member.organization_id);
        }
    }

    pub fn is_member(&self, user: UserId, organization: OrganizationId) -> bool {
        match self.members.read() {
            Ok(members) => members.contains_key(&(user, organization)),
            Err(_) => false,
        }
    }

    pub fn member_of(&self, user: UserId, organization: OrganizationId) -> Option<Member> {
        let members = self.members.read().ok()?;
        members.get(&(user, organization)).cloned()
    }

    /// All members of an organization, ordered by join time (earliest first).
    pub fn members_of(&self, organization: OrganizationId) -> Vec<Member> {
        let members = match self.members.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut rows: Vec<Member> = members
            .values()
            .filter(|m| m.organization_id == organization)
            .cloned()
            .collect();
        rows.sort_by_key(|m| (m.join_time, *m.id.as_uuid()));
        rows
    }

    fn drain_members(&self, predicate: impl Fn(&Member) -> bool) -> Vec<Member> {
        let mut members = match self.members.write() {
            Ok(m) => m,
            Err(poisoned) => poisoned.into_inner(),
        };
        let removed: Vec<Member> = members
            .values()
            .filter(|m| predicate(m))
            .cloned()
            .collect();
        for member in &removed {
            members.remove(&(member.user_id, member.organization_id));
        }
        removed
    }

    fn revoke_derived_grants(&self, user: UserId, organization: OrganizationId) {
        let resource = ResourceId::Organization(organization);
        self.grants.revoke(user, resource, &Permission::VIEW_ORGANIZATION);
        self.grants.revoke(user, resource, &Permission::VIEW_MEMBER);
    }
}
