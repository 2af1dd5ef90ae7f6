use std::sync::Arc;

use orgdesk_acl::{GrantStore, Permission, ResourceId};
use orgdesk_core::OrganizationId;
use orgdesk_directory::{Board, Member, MembershipRegistry, Organization, OrganizationCatalog};

use crate::action::{ensure_valid, required_permission, Action, ResourceKind};
use crate::principal::Principal;
use crate::AccessContractError;

/// A typed reference to the object an access decision is about.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Organization(&'a Organization),
    Board(&'a Board),
    Member(&'a Member),
}

impl Resource<'_> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Organization(_) => ResourceKind::Organization,
            Resource::Board(_) => ResourceKind::Board,
            Resource::Member(_) => ResourceKind::Member,
        }
    }

    fn organization_id(&self) -> OrganizationId {
        match self {
            Resource::Organization(o) => o.id_typed(),
            Resource::Board(b) => b.organization_id(),
            Resource::Member(m) => m.organization_id,
        }
    }

    /// The resource instance an explicit grant must name.
    ///
    /// Member-scoped permission codes attach to the owning organization
    /// (member view/kick rights are organization-wide, not per row).
    fn grant_resource(&self) -> ResourceId {
        match self {
            Resource::Organization(o) => ResourceId::Organization(o.id_typed()),
            Resource::Board(b) => ResourceId::Board(b.id_typed()),
            Resource::Member(m) => ResourceId::Organization(m.organization_id),
        }
    }
}

/// Stateless evaluator combining ownership, structural visibility and
/// explicit ACL grants into an allow/deny decision per action.
///
/// `can` never reports a denial as an error: `Ok(false)` is the only denial
/// shape. How a denial surfaces is caller policy — object-level denials map
/// to "not found" so private resources do not leak their existence,
/// request-level denials map to "forbidden".
pub struct AccessDecisionEngine {
    catalog: Arc<dyn OrganizationCatalog>,
    registry: Arc<MembershipRegistry>,
    grants: Arc<dyn GrantStore>,
}

impl AccessDecisionEngine {
    pub fn new(
        catalog: Arc<dyn OrganizationCatalog>,
        registry: Arc<MembershipRegistry>,
        grants: Arc<dyn GrantStore>,
    ) -> Self {
        Self {
            catalog,
            registry,
            grants,
        }
    }

    /// Decide whether `principal` may perform `action` on `resource`.
    ///
    /// Pure function of current stored state, no side effects. Checks run in
    /// a fixed order and short-circuit on the first allow:
    /// 1. ownership (organization representative),
    /// 2. structural visibility (public flags + membership, view only),
    /// 3. explicit grant.
    ///
    /// Asking for an action the resource kind does not define is a contract
    /// violation and returns [`AccessContractError::InvalidAction`].
    pub fn can(
        &self,
        principal: &Principal,
        resource: Resource<'_>,
        action: Action,
    ) -> Result<bool, AccessContractError> {
        let kind = resource.kind();
        ensure_valid(kind, action)?;

        // Structural facts live on the owning organization. If it is gone,
        // there is nothing to own or to be a member of; only the resolution
        // below can fail this way and it fails closed.
        let organization = match resource {
            Resource::Organization(o) => Some((*o).clone()),
            _ => self.catalog.get(resource.organization_id()),
        };
        let Some(organization) = organization else {
            return Ok(false);
        };

        if self.is_owner(principal, &organization) {
            return Ok(true);
        }

        if action == Action::View && self.is_structurally_visible(principal, resource, &organization)
        {
            return Ok(true);
        }

        let allowed = self.has_explicit_grant(principal, resource, action);
        if !allowed {
            tracing::debug!(%kind, %action, organization = %organization.id_typed(), "access denied");
        }
        Ok(allowed)
    }

    /// The representative has full control over the organization and every
    /// resource within it, grants or not.
    fn is_owner(&self, principal: &Principal, organization: &Organization) -> bool {
        principal.user_id() == Some(organization.representative())
    }

    fn is_structurally_visible(
        &self,
        principal: &Principal,
        resource: Resource<'_>,
        organization: &Organization,
    ) -> bool {
        match resource {
            Resource::Organization(_) => organization.is_public(),
            Resource::Board(board) => {
                board.is_public()
                    && principal
                        .user_id()
                        .is_some_and(|user| self.registry.is_member(user, organization.id_typed()))
            }
            Resource::Member(member) => {
                let Some(user) = principal.user_id() else {
                    return false;
                };
                organization.is_public()
                    || self.grants.has(
                        user,
                        ResourceId::Organization(member.organization_id),
                        &Permission::VIEW_MEMBER,
                    )
                    || self.registry.is_member(user, organization.id_typed())
            }
        }
    }

    fn has_explicit_grant(
        &self,
        principal: &Principal,
        resource: Resource<'_>,
        action: Action,
    ) -> bool {
        let Some(user) = principal.user_id() else {
            return false;
        };
        let permission = required_permission(resource.kind(), action);
        self.grants.has(user, resource.grant_resource(), &permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgdesk_acl::InMemoryGrantStore;
    use orgdesk_core::UserId;
    use orgdesk_directory::InMemoryOrganizationCatalog;

    struct Fixture {
        catalog: Arc<InMemoryOrganizationCatalog>,
        registry: Arc<MembershipRegistry>,
        grants: Arc<InMemoryGrantStore>,
        engine: AccessDecisionEngine,
    }

    impl Fixture {
        fn new() -> Self {
            let catalog = Arc::new(InMemoryOrganizationCatalog::new());
            let grants = Arc::new(InMemoryGrantStore::new());
            let registry = Arc::new(MembershipRegistry::new(grants.clone()));
            let engine = AccessDecisionEngine::new(catalog.clone(), registry.clone(), grants.clone());
            Self {
                catalog,
                registry,
                grants,
                engine,
            }
        }

        fn organization(&self, name: &str, public: bool) -> Organization {
            let mut org = Organization::new(name, UserId::new()).unwrap();
            org.set_public(public);
            self.catalog.insert(org.clone()).unwrap();
            org
        }

        fn board(&self, org: &Organization, public: bool) -> Board {
            let mut board = Board::new(org.id_typed(), "Roadmap", "").unwrap();
            board.set_public(public);
            board
        }
    }

    fn principal(user: UserId) -> Principal {
        Principal::authenticated(user, "user@example.com")
    }

    #[test]
    fn representative_has_full_control_over_organization() {
        let fx = Fixture::new();
        let org = fx.organization("Acme", false);
        let rep = principal(org.representative());

        for action in [
            Action::View,
            Action::Change,
            Action::Delete,
            Action::Invite,
            Action::Kick,
        ] {
            assert!(fx
                .engine
                .can(&rep, Resource::Organization(&org), action)
                .unwrap());
        }
    }

    #[test]
    fn representative_views_private_board_without_any_grant() {
        let fx = Fixture::new();
        let org = fx.organization("Acme", false);
        let board = fx.board(&org, false);
        let rep = principal(org.representative());

        assert!(fx
            .engine
            .can(&rep, Resource::Board(&board), Action::View)
            .unwrap());
        assert!(fx
            .engine
            .can(&rep, Resource::Board(&board), Action::Change)
            .unwrap());
        assert!(fx
            .engine
            .can(&rep, Resource::Board(&board), Action::Delete)
            .unwrap());
    }

    #[test]
    fn public_organization_is_viewable_by_anyone() {
        let fx = Fixture::new();
        let org = fx.organization("Acme", true);

        assert!(fx
            .engine
            .can(
                &Principal::anonymous(),
                Resource::Organization(&org),
                Action::View
            )
            .unwrap());
        assert!(fx
            .engine
            .can(
                &principal(UserId::new()),
                Resource::Organization(&org),
                Action::View
            )
            .unwrap());
    }

    #[test]
    fn private_organization_is_hidden_without_membership_or_grant() {
        let fx = Fixture::new();
        let org = fx.organization("Acme", false);

        assert!(!fx
            .engine
            .can(
                &principal(UserId::new()),
                Resource::Organization(&org),
                Action::View
            )
            .unwrap());
        assert!(!fx
            .engine
            .can(
                &Principal::anonymous(),
                Resource::Organization(&org),
                Action::View
            )
            .unwrap());
    }

    #[test]
    fn member_views_private_organization_through_derived_grant() {
        let fx = Fixture::new();
        let org = fx.organization("Acme", false);
        let user = UserId::new();
        fx.registry.add_member(user, &org).unwrap();

        assert!(fx
            .engine
            .can(&principal(user), Resource::Organization(&org), Action::View)
            .unwrap());
        // Membership grants visibility, not administration.
        assert!(!fx
            .engine
            .can(&principal(user), Resource::Organization(&org), Action::Invite)
            .unwrap());
        assert!(!fx
            .engine
            .can(&principal(user), Resource::Organization(&org), Action::Delete)
            .unwrap());
    }

    #[test]
    fn public_board_visible_to_members_only() {
        let fx = Fixture::new();
        let org = fx.organization("Acme", true);
        let board = fx.board(&org, true);
        let member = UserId::new();
        fx.registry.add_member(member, &org).unwrap();

        assert!(fx
            .engine
            .can(&principal(member), Resource::Board(&board), Action::View)
            .unwrap());
        assert!(!fx
            .engine
            .can(&principal(UserId::new()), Resource::Board(&board), Action::View)
            .unwrap());
        assert!(!fx
            .engine
            .can(&Principal::anonymous(), Resource::Board(&board), Action::View)
            .unwrap());
    }

    #[test]
    fn private_board_requires_explicit_grant_even_for_members() {
        let fx = Fixture::new();
        let org = fx.organization("Acme", true);
        let board = fx.board(&org, false);
        let member = UserId::new();
        fx.registry.add_member(member, &org).unwrap();

        assert!(!fx
            .engine
            .can(&principal(member), Resource::Board(&board), Action::View)
            .unwrap());

        fx.grants.grant(
            member,
            ResourceId::Board(board.id_typed()),
            Permission::VIEW_BOARD,
        );
        assert!(fx
            .engine
            .can(&principal(member), Resource::Board(&board), Action::View)
            .unwrap());

        fx.grants.revoke(
            member,
            ResourceId::Board(board.id_typed()),
            &Permission::VIEW_BOARD,
        );
        assert!(!fx
            .engine
            .can(&principal(member), Resource::Board(&board), Action::View)
            .unwrap());
    }

    #[test]
    fn view_board_grant_admits_non_members_too() {
        let fx = Fixture::new();
        let org = fx.organization("Acme", false);
        let board = fx.board(&org, false);
        let outsider = UserId::new();

        assert!(!fx
            .engine
            .can(&principal(outsider), Resource::Board(&board), Action::View)
            .unwrap());

        fx.grants.grant(
            outsider,
            ResourceId::Board(board.id_typed()),
            Permission::VIEW_BOARD,
        );
        assert!(fx
            .engine
            .can(&principal(outsider), Resource::Board(&board), Action::View)
            .unwrap());
    }

    #[test]
    fn member_listing_visibility_rules() {
        let fx = Fixture::new();
        let public_org = fx.organization("Open Org", true);
        let private_org = fx.organization("Closed Org", false);

        let insider = UserId::new();
        let outsider = UserId::new();
        let listed = UserId::new();

        fx.registry.add_member(insider, &private_org).unwrap();
        let private_row = fx.registry.add_member(listed, &private_org).unwrap();
        let public_row = fx.registry.add_member(listed, &public_org).unwrap();

        // Public organization: any authenticated principal.
        assert!(fx
            .engine
            .can(&principal(outsider), Resource::Member(&public_row), Action::View)
            .unwrap());
        // But never anonymous.
        assert!(!fx
            .engine
            .can(
                &Principal::anonymous(),
                Resource::Member(&public_row),
                Action::View
            )
            .unwrap());

        // Private organization: co-members yes, outsiders no.
        assert!(fx
            .engine
            .can(&principal(insider), Resource::Member(&private_row), Action::View)
            .unwrap());
        assert!(!fx
            .engine
            .can(&principal(outsider), Resource::Member(&private_row), Action::View)
            .unwrap());

        // An explicit view_member grant on the organization opens the listing.
        fx.grants.grant(
            outsider,
            ResourceId::Organization(private_org.id_typed()),
            Permission::VIEW_MEMBER,
        );
        assert!(fx
            .engine
            .can(&principal(outsider), Resource::Member(&private_row), Action::View)
            .unwrap());
    }

    #[test]
    fn invite_requires_ownership_or_explicit_grant() {
        let fx = Fixture::new();
        let org = fx.organization("Acme", true);
        let user = UserId::new();
        fx.registry.add_member(user, &org).unwrap();

        assert!(!fx
            .engine
            .can(&principal(user), Resource::Organization(&org), Action::Invite)
            .unwrap());

        fx.grants.grant(
            user,
            ResourceId::Organization(org.id_typed()),
            Permission::INVITE_MEMBER,
        );
        assert!(fx
            .engine
            .can(&principal(user), Resource::Organization(&org), Action::Invite)
            .unwrap());
    }

    #[test]
    fn invalid_pairing_is_a_contract_violation_not_a_denial() {
        let fx = Fixture::new();
        let org = fx.organization("Acme", true);
        let board = fx.board(&org, true);

        let err = fx
            .engine
            .can(
                &principal(org.representative()),
                Resource::Board(&board),
                Action::Invite,
            )
            .unwrap_err();
        assert_eq!(
            err,
            AccessContractError::InvalidAction {
                kind: ResourceKind::Board,
                action: Action::Invite
            }
        );
    }

    #[test]
    fn missing_owning_organization_fails_closed() {
        let fx = Fixture::new();
        // Not inserted into the catalog.
        let org = Organization::new("Ghost", UserId::new()).unwrap();
        let board = Board::new(org.id_typed(), "Orphan", "").unwrap();

        assert!(!fx
            .engine
            .can(
                &principal(org.representative()),
                Resource::Board(&board),
                Action::View
            )
            .unwrap());
    }

    /// End-to-end scenario: private organization "acme", representative R,
    /// member M. M can view the organization and its member list but cannot
    /// administer it; a view_board grant opens (and its revocation closes)
    /// a private board; R keeps full control throughout.
    #[test]
    fn acme_private_organization_scenario() {
        let fx = Fixture::new();
        let acme = fx.organization("acme", false);
        let r = principal(acme.representative());
        let m_user = UserId::new();
        let m = principal(m_user);

        let row = fx.registry.add_member(m_user, &acme).unwrap();

        // M can view acme and its member list.
        assert!(fx
            .engine
            .can(&m, Resource::Organization(&acme), Action::View)
            .unwrap());
        assert!(fx
            .engine
            .can(&m, Resource::Member(&row), Action::View)
            .unwrap());

        // M cannot invite to or delete acme.
        assert!(!fx
            .engine
            .can(&m, Resource::Organization(&acme), Action::Invite)
            .unwrap());
        assert!(!fx
            .engine
            .can(&m, Resource::Organization(&acme), Action::Delete)
            .unwrap());

        // Private board B: invisible to M until granted.
        let b = fx.board(&acme, false);
        assert!(!fx.engine.can(&m, Resource::Board(&b), Action::View).unwrap());

        fx.grants.grant(
            m_user,
            ResourceId::Board(b.id_typed()),
            Permission::VIEW_BOARD,
        );
        assert!(fx.engine.can(&m, Resource::Board(&b), Action::View).unwrap());

        fx.grants.revoke(
            m_user,
            ResourceId::Board(b.id_typed()),
            &Permission::VIEW_BOARD,
        );
        assert!(!fx.engine.can(&m, Resource::Board(&b), Action::View).unwrap());

        // R can always view/change/delete B regardless of grants.
        for action in [Action::View, Action::Change, Action::Delete] {
            assert!(fx.engine.can(&r, Resource::Board(&b), action).unwrap());
        }
    }
}
