//! `orgdesk-throttle` — sliding-window rate limiting for abuse-prone
//! operations.
//!
//! The limiter is a collaborator, not a wrapper: callers ask
//! [`RateLimiter::allow`] before performing the throttled operation, so the
//! same limiter can guard invitation sends, accepts, or anything else that
//! needs per-principal pacing.

pub mod clock;
pub mod limiter;

pub use clock::{Clock, ManualClock, SystemClock};
pub use limiter::{RateLimiter, ThrottleKey, ThrottlePolicy};
