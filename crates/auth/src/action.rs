use serde::{Deserialize, Serialize};
use thiserror::Error;

use orgdesk_acl::Permission;

/// Action a principal may request on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Change,
    Delete,
    Invite,
    Kick,
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Action::View => "view",
            Action::Change => "change",
            Action::Delete => "delete",
            Action::Invite => "invite",
            Action::Kick => "kick",
        };
        f.write_str(s)
    }
}

/// The kind of resource an access decision is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Organization,
    Board,
    Member,
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            ResourceKind::Organization => "organization",
            ResourceKind::Board => "board",
            ResourceKind::Member => "member",
        };
        f.write_str(s)
    }
}

/// Contract breach between the caller and the decision engine.
///
/// Denials are values, never errors; this error only reports requests the
/// engine's action table does not define at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessContractError {
    #[error("action '{action}' is not defined for resource kind '{kind}'")]
    InvalidAction { kind: ResourceKind, action: Action },
}

/// The fixed table of valid actions per resource kind.
pub fn allowed_actions(kind: ResourceKind) -> &'static [Action] {
    match kind {
        ResourceKind::Organization => &[
            Action::View,
            Action::Change,
            Action::Delete,
            Action::Invite,
            Action::Kick,
        ],
        ResourceKind::Board => &[Action::View, Action::Change, Action::Delete],
        ResourceKind::Member => &[Action::View, Action::Kick],
    }
}

pub(crate) fn ensure_valid(kind: ResourceKind, action: Action) -> Result<(), AccessContractError> {
    if allowed_actions(kind).contains(&action) {
        Ok(())
    } else {
        Err(AccessContractError::InvalidAction { kind, action })
    }
}

/// Permission code an explicit grant must carry to allow `action` on `kind`.
///
/// Member-scoped codes attach to the *organization* resource; the engine
/// handles that indirection when it builds the grant lookup.
pub(crate) fn required_permission(kind: ResourceKind, action: Action) -> Permission {
    match (kind, action) {
        (ResourceKind::Organization, Action::View) => Permission::VIEW_ORGANIZATION,
        (ResourceKind::Organization, Action::Change) => Permission::CHANGE_ORGANIZATION,
        (ResourceKind::Organization, Action::Delete) => Permission::DELETE_ORGANIZATION,
        (ResourceKind::Organization, Action::Invite) => Permission::INVITE_MEMBER,
        (ResourceKind::Organization, Action::Kick) => Permission::KICK_MEMBER,
        (ResourceKind::Board, Action::View) => Permission::VIEW_BOARD,
        (ResourceKind::Board, Action::Change) => Permission::CHANGE_BOARD,
        (ResourceKind::Board, Action::Delete) => Permission::DELETE_BOARD,
        (ResourceKind::Member, Action::View) => Permission::VIEW_MEMBER,
        (ResourceKind::Member, Action::Kick) => Permission::KICK_MEMBER,
        // Unreachable for pairings that pass `ensure_valid`; map the rest to
        // a code nothing grants so they can never allow.
        _ => Permission::new(format!("{kind}.{action}")),
    }
}
