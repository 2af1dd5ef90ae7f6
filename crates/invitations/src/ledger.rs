use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use orgdesk_auth::Principal;
use orgdesk_core::{OrganizationId, UserId};
use orgdesk_directory::{
    Member, MembershipError, MembershipRegistry, Organization, OrganizationCatalog,
};

use crate::invitation::{Invitation, InvitationId};
use crate::notify::{invitation_message, NotificationDispatcher};

/// Failure to create an invitation. Caller-correctable request errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InviteError {
    /// A pending invitation for this (organization, email) already exists.
    #[error("invitation is already sent")]
    DuplicateInvite,

    /// The recipient address failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(String),
}

/// Failure to accept an invitation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AcceptError {
    /// Anonymous principals can not accept invitations.
    #[error("authentication is required to accept an invitation")]
    NotAuthenticated,

    /// No pending invitation with this identifier.
    #[error("invitation not found")]
    UnknownInvitation,

    /// The accepting principal's email is not the invitation's email.
    /// The invitation stays pending: a user whose email changed after the
    /// invite was created can no longer accept it, by design.
    #[error("your email is not associated with the invitation")]
    EmailMismatch,

    /// The invitee already joined; the stale invitation has been cleaned up.
    #[error("user is already a member of the organization")]
    AlreadyMember,

    /// The representative can not join its own organization.
    #[error("organization representative can not be its member")]
    IsRepresentative,
}

/// Time-ordered, deduplicated pending invitations per (organization, email).
///
/// Acceptance is the only path from invitation to membership: it delegates to
/// [`MembershipRegistry::add_member`] (whose uniqueness constraint arbitrates
/// concurrent double-accepts) and consumes the invitation exactly once.
pub struct InvitationLedger {
    invitations: RwLock<HashMap<InvitationId, Invitation>>,
    registry: Arc<MembershipRegistry>,
    catalog: Arc<dyn OrganizationCatalog>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl InvitationLedger {
    pub fn new(
        registry: Arc<MembershipRegistry>,
        catalog: Arc<dyn OrganizationCatalog>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            invitations: RwLock::new(HashMap::new()),
            registry,
            catalog,
            dispatcher,
        }
    }

    /// Create a pending invitation and dispatch the invite message.
    ///
    /// The dispatch is fire-and-forget: a failed or zero-delivery send is
    /// logged and the invitation stands.
    pub fn invite(
        &self,
        organization: &Organization,
        email: &str,
        inviter: UserId,
    ) -> Result<Invitation, InviteError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(InviteError::InvalidEmail(email));
        }

        let invitation = {
            let mut invitations = match self.invitations.write() {
                Ok(i) => i,
                Err(poisoned) => poisoned.into_inner(),
            };

            let org_id = organization.id_typed();
            if invitations
                .values()
                .any(|i| i.organization_id == org_id && i.email == email)
            {
                return Err(InviteError::DuplicateInvite);
            }

            let invitation = Invitation::new(org_id, email, inviter);
            invitations.insert(invitation.uid.clone(), invitation.clone());
            invitation
        };

        let message = invitation_message(&invitation, organization.name());
        let delivered = self.dispatcher.send(&invitation.email, &message);
        if delivered == 0 {
            tracing::warn!(uid = %invitation.uid, "invitation message was not delivered");
        } else {
            tracing::debug!(uid = %invitation.uid, delivered, "invitation created");
        }

        Ok(invitation)
    }

    /// Accept an invitation on behalf of `accepting`.
    ///
    /// Resolution order: authentication, invitation lookup, email equality,
    /// then membership creation. `AlreadyMember` deletes the stale invitation
    /// before surfacing; every other failure leaves it pending.
    pub fn accept(&self, uid: &InvitationId, accepting: &Principal) -> Result<Member, AcceptError> {
        let Some(user_id) = accepting.user_id() else {
            return Err(AcceptError::NotAuthenticated);
        };

        let invitation = self.get(uid).ok_or(AcceptError::UnknownInvitation)?;
        // A dangling invitation (organization deleted since) does not resolve.
        let organization = self
            .catalog
            .get(invitation.organization_id)
            .ok_or(AcceptError::UnknownInvitation)?;

        // Same normalization as `invite`: the stored email is lowercased, so
        // a mixed-case address from the identity provider must still match.
        let email = accepting.email().map(|e| e.trim().to_lowercase());
        if email.as_deref() != Some(invitation.email.as_str()) {
            return Err(AcceptError::EmailMismatch);
        }

        match self.registry.add_member(user_id, &organization) {
            Ok(member) => {
                // Single-use: consumed exactly once.
                self.delete(uid);
                tracing::debug!(uid = %uid, user = %user_id, "invitation accepted");
                Ok(member)
            }
            Err(MembershipError::AlreadyMember) => {
                // The invite is stale; clean it up before reporting.
                self.delete(uid);
                Err(AcceptError::AlreadyMember)
            }
            Err(MembershipError::IsRepresentative) => Err(AcceptError::IsRepresentative),
        }
    }

    pub fn get(&self, uid: &InvitationId) -> Option<Invitation> {
        let invitations = self.invitations.read().ok()?;
        invitations.get(uid).cloned()
    }

    /// Pending invitations of an organization, earliest first.
    pub fn pending_for(&self, organization: OrganizationId) -> Vec<Invitation> {
        let invitations = match self.invitations.read() {
            Ok(i) => i,
            Err(_) => return vec![],
        };
        let mut pending: Vec<Invitation> = invitations
            .values()
            .filter(|i| i.organization_id == organization)
            .cloned()
            .collect();
        pending.sort_by(|a, b| {
            (a.invite_time, a.uid.as_str()).cmp(&(b.invite_time, b.uid.as_str()))
        });
        pending
    }

    /// Cancel a pending invitation. Unknown uids are a no-op.
    pub fn cancel(&self, uid: &InvitationId) {
        self.delete(uid);
    }

    fn delete(&self, uid: &InvitationId) {
        let mut invitations = match self.invitations.write() {
            Ok(i) => i,
            Err(poisoned) => poisoned.into_inner(),
        };
        invitations.remove(uid);
    }
}
