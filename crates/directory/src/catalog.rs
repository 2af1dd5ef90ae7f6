use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use orgdesk_core::{DomainError, DomainResult, OrganizationId};

use crate::organization::Organization;

/// Lookup surface for organizations.
///
/// This is the persistence collaborator the decision engine and registries
/// consult for structural facts (representative, public flag). Backed stores
/// plug in here; the in-memory variant serves tests and dev.
pub trait OrganizationCatalog: Send + Sync {
    fn get(&self, id: OrganizationId) -> Option<Organization>;
    fn get_by_slug(&self, slug: &str) -> Option<Organization>;
    /// Insert a new organization. Fails on duplicate id or slug.
    fn insert(&self, organization: Organization) -> DomainResult<()>;
    fn remove(&self, id: OrganizationId) -> Option<Organization>;
}

impl<S> OrganizationCatalog for Arc<S>
where
    S: OrganizationCatalog + ?Sized,
{
    fn get(&self, id: OrganizationId) -> Option<Organization> {
        (**self).get(id)
    }

    fn get_by_slug(&self, slug: &str) -> Option<Organization> {
        (**self).get_by_slug(slug)
    }

    fn insert(&self, organization: Organization) -> DomainResult<()> {
        (**self).insert(organization)
    }

    fn remove(&self, id: OrganizationId) -> Option<Organization> {
        (**self).remove(id)
    }
}

/// In-memory organization catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryOrganizationCatalog {
    inner: RwLock<HashMap<OrganizationId, Organization>>,
}

impl InMemoryOrganizationCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrganizationCatalog for InMemoryOrganizationCatalog {
    fn get(&self, id: OrganizationId) -> Option<Organization> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    fn get_by_slug(&self, slug: &str) -> Option<Organization> {
        let map = self.inner.read().ok()?;
        map.values().find(|o| o.slug() == slug).cloned()
    }

    fn insert(&self, organization: Organization) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::conflict("catalog lock poisoned"))?;

        if map.contains_key(&organization.id_typed()) {
            return Err(DomainError::conflict("organization id already exists"));
        }
        if map.values().any(|o| o.slug() == organization.slug()) {
            return Err(DomainError::conflict("organization slug already exists"));
        }

        map.insert(organization.id_typed(), organization);
        Ok(())
    }

    fn remove(&self, id: OrganizationId) -> Option<Organization> {
        let mut map = self.inner.write().ok()?;
        map.remove(&id)
    }
}
