use serde::{Deserialize, Serialize};

use orgdesk_core::{slug_with_suffix, BoardId, DomainError, DomainResult, Entity, OrganizationId};

const TITLE_MAX_LEN: usize = 50;
const SLUG_SUFFIX_LEN: usize = 6;

/// Board: belongs to exactly one organization.
///
/// Title is immutable to prevent URL changes; the slug is derived from the
/// title plus a random disambiguator at creation time and never regenerated.
/// A public board is visible to all organization members; a private one only
/// via an explicit `view_board` grant or to the representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    organization_id: OrganizationId,
    title: String,
    description: String,
    slug: String,
    public: bool,
}

impl Board {
    pub fn new(
        organization_id: OrganizationId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> DomainResult<Self> {
        let title = title.into();
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        if title.chars().count() > TITLE_MAX_LEN {
            return Err(DomainError::validation(format!(
                "title cannot exceed {TITLE_MAX_LEN} characters"
            )));
        }

        Ok(Self {
            id: BoardId::new(),
            organization_id,
            title: title.to_string(),
            description: description.into(),
            slug: slug_with_suffix(title, SLUG_SUFFIX_LEN),
            public: true,
        })
    }

    pub fn id_typed(&self) -> BoardId {
        self.id
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_public(&mut self, public: bool) {
        self.public = public;
    }
}

impl Entity for Board {
    type Id = BoardId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_public_with_disambiguated_slug() {
        let board = Board::new(OrganizationId::new(), "Team Roadmap", "").unwrap();

        assert!(board.is_public());
        assert!(board.slug().starts_with("team-roadmap-"));
        assert_eq!(board.slug().len(), "team-roadmap-".len() + SLUG_SUFFIX_LEN);
    }

    #[test]
    fn slugs_differ_for_equal_titles() {
        let org = OrganizationId::new();
        let a = Board::new(org, "Roadmap", "").unwrap();
        let b = Board::new(org, "Roadmap", "").unwrap();
        assert_ne!(a.slug(), b.slug());
    }

    #[test]
    fn rejects_blank_title() {
        let err = Board::new(OrganizationId::new(), "  ", "desc").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn title_length_is_counted_in_characters_not_bytes() {
        let board = Board::new(OrganizationId::new(), "ö".repeat(50), "").unwrap();
        assert_eq!(board.title().chars().count(), 50);

        let err = Board::new(OrganizationId::new(), "ö".repeat(51), "").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
