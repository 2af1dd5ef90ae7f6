use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use orgdesk_core::UserId;

use crate::grant::{Grant, Permission, ResourceId};

/// Exact-match filter for listing grants on a resource.
///
/// No partial matching: a filter either pins a field or leaves it open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantFilter {
    pub subject: Option<UserId>,
    pub permission: Option<Permission>,
}

impl GrantFilter {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: UserId) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn permission(mut self, permission: Permission) -> Self {
        self.permission = Some(permission);
        self
    }

    fn matches(&self, grant: &Grant) -> bool {
        self.subject.is_none_or(|s| s == grant.subject)
            && self
                .permission
                .as_ref()
                .is_none_or(|p| *p == grant.permission)
    }
}

/// Persistent set of (subject, resource, permission) ACL entries.
pub trait GrantStore: Send + Sync {
    /// Record a grant. Granting an already-granted permission is a no-op.
    fn grant(&self, subject: UserId, resource: ResourceId, permission: Permission);

    /// Remove a grant. Revoking a non-existent grant is a no-op: callers such
    /// as membership removal must not fail when grants were already absent.
    fn revoke(&self, subject: UserId, resource: ResourceId, permission: &Permission);

    /// Whether a grant exists for the exact triple.
    fn has(&self, subject: UserId, resource: ResourceId, permission: &Permission) -> bool;

    /// All grants on a resource, narrowed by an exact-match filter.
    fn list_for_resource(&self, resource: ResourceId, filter: &GrantFilter) -> Vec<Grant>;
}

impl<S> GrantStore for Arc<S>
where
    S: GrantStore + ?Sized,
{
    fn grant(&self, subject: UserId, resource: ResourceId, permission: Permission) {
        (**self).grant(subject, resource, permission)
    }

    fn revoke(&self, subject: UserId, resource: ResourceId, permission: &Permission) {
        (**self).revoke(subject, resource, permission)
    }

    fn has(&self, subject: UserId, resource: ResourceId, permission: &Permission) -> bool {
        (**self).has(subject, resource, permission)
    }

    fn list_for_resource(&self, resource: ResourceId, filter: &GrantFilter) -> Vec<Grant> {
        (**self).list_for_resource(resource, filter)
    }
}

/// In-memory grant store for tests/dev.
///
/// Each call is independently atomic; uniqueness comes from set semantics.
#[derive(Debug, Default)]
pub struct InMemoryGrantStore {
    inner: RwLock<HashSet<Grant>>,
}

impl InMemoryGrantStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GrantStore for InMemoryGrantStore {
    // Mutations must never be dropped on a poisoned lock: membership
    // operations count on every grant/revoke taking effect.
    fn grant(&self, subject: UserId, resource: ResourceId, permission: Permission) {
        let mut set = match self.inner.write() {
            Ok(s) => s,
            Err(poisoned) => poisoned.into_inner(),
        };
        let inserted = set.insert(Grant::new(subject, resource, permission.clone()));
        if inserted {
            tracing::debug!(%subject, %resource, %permission, "grant assigned");
        }
    }

    fn revoke(&self, subject: UserId, resource: ResourceId, permission: &Permission) {
        let mut set = match self.inner.write() {
            Ok(s) => s,
            Err(poisoned) => poisoned.into_inner(),
        };
        let removed = set.remove(&Grant::new(subject, resource, permission.clone()));
        if removed {
            tracing::debug!(%subject, %resource, %permission, "grant revoked");
        }
    }

    fn has(&self, subject: UserId, resource: ResourceId, permission: &Permission) -> bool {
        let set = match self.inner.read() {
            Ok(s) => s,
            Err(poisoned) => poisoned.into_inner(),
        };
        set.contains(&Grant::new(subject, resource, permission.clone()))
    }

    fn list_for_resource(&self, resource: ResourceId, filter: &GrantFilter) -> Vec<Grant> {
        let set = match self.inner.read() {
            Ok(s) => s,
            Err(poisoned) => poisoned.into_inner(),
        };
        set.iter()
            .filter(|g| g.resource == resource && filter.matches(g))
            .cloned()
            .collect()
    }
}
