//! `orgdesk-invitations` — pending offers to join an organization.
//!
//! An invitation is single-use and email-addressed; it is not an identity.
//! The accepting principal is validated against the invitation's email at
//! resolution time, never stored as a user reference in advance.

pub mod invitation;
pub mod ledger;
pub mod notify;

pub use invitation::{Invitation, InvitationId};
pub use ledger::{AcceptError, InvitationLedger, InviteError};
pub use notify::{invitation_message, LoggingDispatcher, NotificationDispatcher};
