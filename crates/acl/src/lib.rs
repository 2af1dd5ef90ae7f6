//! `orgdesk-acl` — explicit per-object permission grants.
//!
//! Grants are the only persistent authorization state outside of ownership and
//! membership structural facts: they model exceptions to default visibility
//! (e.g. giving one user view access to one private board).

pub mod grant;
pub mod store;

pub use grant::{Grant, Permission, ResourceId};
pub use store::{GrantFilter, GrantStore, InMemoryGrantStore};
