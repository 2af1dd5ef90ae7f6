use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orgdesk_core::{short_uid, OrganizationId, UserId};

const UID_LEN: usize = 6;

/// Short random unique identifier of an invitation, usable in join links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvitationId(String);

impl InvitationId {
    pub fn generate() -> Self {
        Self(short_uid(UID_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for InvitationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InvitationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A pending, email-addressed offer to join an organization.
///
/// At most one pending invitation exists per (organization, email) at any
/// time; listings order by `invite_time` ascending. Any instance is
/// independently resolvable, the ordering is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub uid: InvitationId,
    pub organization_id: OrganizationId,
    pub email: String,
    pub inviter: UserId,
    pub invite_time: DateTime<Utc>,
}

impl Invitation {
    pub(crate) fn new(organization_id: OrganizationId, email: String, inviter: UserId) -> Self {
        Self {
            uid: InvitationId::generate(),
            organization_id,
            email,
            inviter,
            invite_time: Utc::now(),
        }
    }

    /// Relative URL the invitee follows to join.
    pub fn join_url(&self) -> String {
        format!("/invitations/join?invite={}", self.uid)
    }
}
