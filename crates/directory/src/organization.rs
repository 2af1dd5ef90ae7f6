use serde::{Deserialize, Serialize};

use orgdesk_core::{slugify, DomainError, DomainResult, Entity, OrganizationId, UserId};

const NAME_MAX_LEN: usize = 50;

/// Organization: the tenant boundary of the system.
///
/// # Invariants
/// - Exactly one representative, set at creation and never reassigned.
/// - The representative is never simultaneously a member of the organization
///   (enforced by [`crate::MembershipRegistry`] at validation time).
/// - `public` controls default visibility of the organization and of its
///   boards' member listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    id: OrganizationId,
    slug: String,
    name: String,
    representative: UserId,
    public: bool,
    website_url: Option<String>,
    verified: bool,
}

impl Organization {
    /// Create an organization. The creating user becomes its representative.
    pub fn new(name: impl Into<String>, representative: UserId) -> DomainResult<Self> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if name.chars().count() > NAME_MAX_LEN {
            return Err(DomainError::validation(format!(
                "name cannot exceed {NAME_MAX_LEN} characters"
            )));
        }

        Ok(Self {
            id: OrganizationId::new(),
            slug: slugify(name),
            name: name.to_string(),
            representative,
            public: true,
            website_url: None,
            verified: false,
        })
    }

    pub fn id_typed(&self) -> OrganizationId {
        self.id
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sole owner of the organization; full authority over it and its resources.
    pub fn representative(&self) -> UserId {
        self.representative
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn website_url(&self) -> Option<&str> {
        self.website_url.as_deref()
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn set_public(&mut self, public: bool) {
        self.public = public;
    }

    pub fn set_website_url(&mut self, url: Option<String>) {
        self.website_url = url;
    }

    /// Verification is granted by platform operators, not by the tenant.
    pub fn set_verified(&mut self, verified: bool) {
        self.verified = verified;
    }
}

impl Entity for Organization {
    type Id = OrganizationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_organization_is_public_with_slug_from_name() {
        let rep = UserId::new();
        let org = Organization::new("Acme Widgets", rep).unwrap();

        assert_eq!(org.name(), "Acme Widgets");
        assert_eq!(org.slug(), "acme-widgets");
        assert_eq!(org.representative(), rep);
        assert!(org.is_public());
        assert!(!org.is_verified());
    }

    #[test]
    fn rejects_empty_name() {
        let err = Organization::new("   ", UserId::new()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rejects_overlong_name() {
        let err = Organization::new("x".repeat(51), UserId::new()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn name_length_is_counted_in_characters_not_bytes() {
        // 50 two-byte characters; valid despite being 100 bytes.
        let org = Organization::new("ö".repeat(50), UserId::new()).unwrap();
        assert_eq!(org.name().chars().count(), 50);

        let err = Organization::new("ö".repeat(51), UserId::new()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
