//! `orgdesk-directory` — organizations, boards and membership.
//!
//! Structural authorization facts live here: who represents an organization,
//! who is a member of it, and which boards belong to it. Membership changes
//! carry derived ACL side effects (see [`MembershipRegistry`]).

pub mod board;
pub mod catalog;
pub mod member;
pub mod organization;
pub mod registry;

pub use board::Board;
pub use catalog::{InMemoryOrganizationCatalog, OrganizationCatalog};
pub use member::Member;
pub use organization::Organization;
pub use registry::{MembershipError, MembershipRegistry};
