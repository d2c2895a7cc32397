//! Fixed-rate loop pacing.
//!
//! The main loop runs one [`NodeService::tick`](crate::app::service::NodeService::tick)
//! per period. Deadlines advance by exactly one period per iteration so a
//! short tick does not shorten the next one and jitter does not accumulate.
//!
//! ```text
//!   deadline:   0      50     100    150    200
//!               │──────│──────│──────│──────│
//!   tick:       ██     █████  ██            ███
//!               └ wait ┘      └ wait ┘
//!                                     ▲ overrun: resync to now
//! ```
//!
//! A tick that blows through its deadline (e.g. a blocking broker connect)
//! does not trigger a burst of catch-up iterations: the schedule re-anchors
//! at the current time.

use log::debug;

pub struct LoopScheduler {
    period_ms: u64,
    next_deadline_ms: Option<u64>,
    overruns: u32,
}

impl LoopScheduler {
    pub const fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            next_deadline_ms: None,
            overruns: 0,
        }
    }

    /// How long to sleep after a tick that finished at `now_ms`.
    pub fn next_wait(&mut self, now_ms: u64) -> u64 {
        let deadline = match self.next_deadline_ms {
            Some(d) => d,
            None => now_ms + self.period_ms,
        };

        if now_ms >= deadline {
            self.overruns = self.overruns.saturating_add(1);
            debug!(
                "scheduler: overrun by {}ms (total {})",
                now_ms - deadline,
                self.overruns
            );
            self.next_deadline_ms = Some(now_ms + self.period_ms);
            return 0;
        }

        self.next_deadline_ms = Some(deadline + self.period_ms);
        deadline - now_ms
    }

    /// Iterations that finished past their deadline.
    pub fn overruns(&self) -> u32 {
        self.overruns
    }
}
