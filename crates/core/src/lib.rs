//! `orgdesk-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod shortid;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BoardId, MemberId, OrganizationId, UserId};
pub use shortid::{short_uid, slugify, slug_with_suffix};
