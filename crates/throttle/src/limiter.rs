use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use orgdesk_auth::Principal;
use orgdesk_core::UserId;

use crate::clock::Clock;

/// Identity a request history is kept under.
///
/// Every anonymous caller shares one bucket, so unauthenticated traffic is
/// throttled collectively rather than per connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrottleKey {
    User(UserId),
    Anonymous,
}

impl ThrottleKey {
    pub fn for_principal(principal: &Principal) -> Self {
        match principal.user_id() {
            Some(user_id) => Self::User(user_id),
            None => Self::Anonymous,
        }
    }
}

impl From<&Principal> for ThrottleKey {
    fn from(principal: &Principal) -> Self {
        Self::for_principal(principal)
    }
}

/// How many requests a key may make within a sliding window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottlePolicy {
    pub max_requests: u32,
    pub window: Duration,
}

impl ThrottlePolicy {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    /// Pacing for invitation sends: 5 per hour per key.
    pub fn invitation() -> Self {
        Self::new(5, Duration::hours(1))
    }

    /// Short-fuse pacing for interactive endpoints: 5 per second per key.
    pub fn burst() -> Self {
        Self::new(5, Duration::seconds(1))
    }
}

/// Sliding-window rate limiter keyed by [`ThrottleKey`].
///
/// The window slides continuously: a request is admitted iff strictly fewer
/// than `max_requests` admissions happened within the trailing `window`.
/// Denied requests are not recorded and do not extend the wait.
pub struct RateLimiter {
    policy: ThrottlePolicy,
    clock: Arc<dyn Clock>,
    history: Mutex<HashMap<ThrottleKey, VecDeque<DateTime<Utc>>>>,
}

impl RateLimiter {
    pub fn new(policy: ThrottlePolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            history: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> ThrottlePolicy {
        self.policy
    }

    /// Admit or deny a request for `key`, recording it when admitted.
    ///
    /// Prune-then-check under one lock, so concurrent callers can never
    /// jointly exceed the budget.
    pub fn allow(&self, key: ThrottleKey) -> bool {
        let now = self.clock.now();
        let horizon = now - self.policy.window;

        let mut history = match self.history.lock() {
            Ok(h) => h,
            Err(poisoned) => poisoned.into_inner(),
        };
        let bucket = history.entry(key).or_default();
        while bucket.front().is_some_and(|t| *t <= horizon) {
            bucket.pop_front();
        }

        if bucket.len() < self.policy.max_requests as usize {
            bucket.push_back(now);
            true
        } else {
            tracing::debug!(?key, "request throttled");
            false
        }
    }

    /// How long until the next request for `key` would be admitted.
    /// Zero when a request would be admitted right now.
    pub fn retry_after(&self, key: ThrottleKey) -> Duration {
        let now = self.clock.now();
        let horizon = now - self.policy.window;

        let history = match self.history.lock() {
            Ok(h) => h,
            Err(poisoned) => poisoned.into_inner(),
        };
        let Some(bucket) = history.get(&key) else {
            return Duration::zero();
        };

        let in_window = bucket.iter().filter(|t| **t > horizon).count();
        if in_window < self.policy.max_requests as usize {
            return Duration::zero();
        }

        // The oldest in-window admission leaving the window frees a slot.
        bucket
            .iter()
            .find(|t| **t > horizon)
            .map(|oldest| *oldest + self.policy.window - now)
            .unwrap_or_else(Duration::zero)
    }

    /// Forget all recorded history.
    pub fn reset(&self) {
        let mut history = match self.history.lock() {
            Ok(h) => h,
            Err(poisoned) => poisoned.into_inner(),
        };
        history.clear();
    }
}
