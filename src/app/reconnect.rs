//! Reconnect rate limiting for the link and session paths.
//!
//! Attempt timestamps live in [`Timers`]; the gate only decides which of
//! them constrain a given attempt. Under [`ReconnectPolicy::Shared`] the
//! most recent attempt of *either* kind blocks both paths, so a link attempt
//! and a session attempt can never both fire inside one delay window.

use crate::config::ReconnectPolicy;

use super::context::Timers;

/// Which subsystem wants to reconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Link,
    Session,
}

#[derive(Debug, Clone, Copy)]
pub struct ReconnectGate {
    delay_ms: u64,
    policy: ReconnectPolicy,
}

impl ReconnectGate {
    pub const fn new(delay_ms: u64, policy: ReconnectPolicy) -> Self {
        Self { delay_ms, policy }
    }

    /// Timestamp of the last attempt that constrains `attempt`.
    fn last_attempt_ms(&self, timers: &Timers, attempt: Attempt) -> u64 {
        match (self.policy, attempt) {
            (ReconnectPolicy::Shared, _) => {
                timers.last_link_attempt_ms.max(timers.last_session_attempt_ms)
            }
            (ReconnectPolicy::Independent, Attempt::Link) => timers.last_link_attempt_ms,
            (ReconnectPolicy::Independent, Attempt::Session) => timers.last_session_attempt_ms,
        }
    }

    /// `true` when at least `delay_ms` has passed since the constraining attempt.
    pub fn permits(&self, timers: &Timers, attempt: Attempt, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_attempt_ms(timers, attempt)) >= self.delay_ms
    }

    /// Record that `attempt` is being made at `now_ms`.
    pub fn stamp(&self, timers: &mut Timers, attempt: Attempt, now_ms: u64) {
        match attempt {
            Attempt::Link => timers.last_link_attempt_ms = now_ms,
            Attempt::Session => timers.last_session_attempt_ms = now_ms,
        }
    }

    /// [`permits`](Self::permits) and, if so, [`stamp`](Self::stamp).
    pub fn try_acquire(&self, timers: &mut Timers, attempt: Attempt, now_ms: u64) -> bool {
        if !self.permits(timers, attempt, now_ms) {
            return false;
        }
        self.stamp(timers, attempt, now_ms);
        true
    }
}
