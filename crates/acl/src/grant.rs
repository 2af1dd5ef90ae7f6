use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use orgdesk_core::{BoardId, MemberId, OrganizationId, UserId};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "view_board"). The known
/// codes are exposed as constants; policy layers may still mint their own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub const VIEW_ORGANIZATION: Permission = Permission(Cow::Borrowed("view_organization"));
    pub const CHANGE_ORGANIZATION: Permission = Permission(Cow::Borrowed("change_organization"));
    pub const DELETE_ORGANIZATION: Permission = Permission(Cow::Borrowed("delete_organization"));
    pub const VIEW_MEMBER: Permission = Permission(Cow::Borrowed("view_member"));
    pub const INVITE_MEMBER: Permission = Permission(Cow::Borrowed("invite_member"));
    pub const KICK_MEMBER: Permission = Permission(Cow::Borrowed("kick_member"));
    pub const VIEW_BOARD: Permission = Permission(Cow::Borrowed("view_board"));
    pub const CHANGE_BOARD: Permission = Permission(Cow::Borrowed("change_board"));
    pub const DELETE_BOARD: Permission = Permission(Cow::Borrowed("delete_board"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a specific object instance a grant attaches to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ResourceId {
    Organization(OrganizationId),
    Board(BoardId),
    Member(MemberId),
}

impl core::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ResourceId::Organization(id) => write!(f, "organization:{id}"),
            ResourceId::Board(id) => write!(f, "board:{id}"),
            ResourceId::Member(id) => write!(f, "member:{id}"),
        }
    }
}

/// ACL entry: one user holds one named permission on one object instance.
///
/// Uniqueness: at most one grant per (subject, resource, permission).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    pub subject: UserId,
    pub resource: ResourceId,
    pub permission: Permission,
}

impl Grant {
    pub fn new(subject: UserId, resource: ResourceId, permission: Permission) -> Self {
        Self {
            subject,
            resource,
            permission,
        }
    }
}
