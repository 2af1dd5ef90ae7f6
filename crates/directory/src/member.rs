use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orgdesk_core::{Entity, MemberId, OrganizationId, UserId};

/// Member: one user's standing association to one organization.
///
/// Unique per (user, organization); `join_time` gives the stable listing
/// order. Created through [`crate::MembershipRegistry`], which also manages
/// the derived ACL grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub user_id: UserId,
    pub organization_id: OrganizationId,
    pub join_time: DateTime<Utc>,
}

impl Member {
    pub(crate) fn new(user_id: UserId, organization_id: OrganizationId) -> Self {
        Self {
            id: MemberId::new(),
            user_id,
            organization_id,
            join_time: Utc::now(),
        }
    }
}

impl Entity for Member {
    type Id = MemberId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
