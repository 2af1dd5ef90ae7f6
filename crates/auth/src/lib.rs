//! `orgdesk-auth` — object-level authorization decisions.
//!
//! This crate is intentionally decoupled from HTTP and storage: it combines
//! ownership, structural visibility and explicit ACL grants into a single
//! allow/deny answer for a (principal, resource, action) triple.

pub mod action;
pub mod engine;
pub mod principal;

pub use action::{allowed_actions, AccessContractError, Action, ResourceKind};
pub use engine::{AccessDecisionEngine, Resource};
pub use principal::Principal;
