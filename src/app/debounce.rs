//! Sensor debouncer: decides when a motion sample is reported.
//!
//! ## Trigger policy
//!
//! | last | current | interval elapsed | trigger |
//! |------|---------|------------------|---------|
//! | LOW  | HIGH    | any              | yes (transition) |
//! | HIGH | LOW     | any              | yes (transition) |
//! | HIGH | HIGH    | yes              | yes (heartbeat)  |
//! | HIGH | HIGH    | no               | no               |
//! | LOW  | LOW     | any              | no               |
//!
//! A triggered cycle always mirrors the sample to the alarm output, even
//! when nothing can be published. `last_observed` follows every trigger;
//! `last_publish_ms` only moves when the session was up.

use crate::config::OfflinePolicy;

use super::context::DeviceContext;
use super::events::NodeEvent;
use super::ports::{AlarmOutputPort, ClockPort, EventSink, MotionInputPort, MotionLevel, SessionPort};
use super::publisher::EventPublisher;

/// Outcome of one [`SensorDebouncer::evaluate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// No trigger this tick.
    Suppressed,
    /// Triggered: the output now mirrors `level`. `published` is whether a
    /// publish was attempted (session up), not whether it was delivered.
    Reported { level: MotionLevel, published: bool },
}

impl Decision {
    pub fn triggered(self) -> bool {
        matches!(self, Self::Reported { .. })
    }
}

/// Pure trigger predicate.
pub fn should_trigger(last_observed: MotionLevel, current: MotionLevel, interval_elapsed: bool) -> bool {
    current != last_observed || (current.is_high() && interval_elapsed)
}

#[derive(Debug, Clone, Copy)]
pub struct SensorDebouncer {
    publish_interval_ms: u64,
    offline_policy: OfflinePolicy,
}

impl SensorDebouncer {
    pub const fn new(publish_interval_ms: u64, offline_policy: OfflinePolicy) -> Self {
        Self {
            publish_interval_ms,
            offline_policy,
        }
    }

    /// Sample the input once and act on the trigger policy.
    pub fn evaluate(
        &self,
        ctx: &mut DeviceContext,
        hw: &mut (impl MotionInputPort + AlarmOutputPort),
        session: &mut impl SessionPort,
        publisher: &EventPublisher,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Decision {
        let current = hw.read_motion();
        let now_ms = clock.uptime_ms();
        let interval_elapsed = now_ms.saturating_sub(ctx.timers.last_publish_ms) >= self.publish_interval_ms;

        if !should_trigger(ctx.motion.last_observed, current, interval_elapsed) {
            return Decision::Suppressed;
        }

        hw.set_alarm(current);
        sink.emit(&if current.is_high() {
            NodeEvent::MotionDetected
        } else {
            NodeEvent::MotionCleared
        });

        let published = ctx.session_up();
        if published {
            // A failed publish is a lost sample; the publisher already logged it.
            let _ = publisher.publish(current, session, clock, sink);
            ctx.timers.last_publish_ms = now_ms;
        } else if self.offline_policy == OfflinePolicy::ReportOnReconnect {
            ctx.motion.missed_while_offline = true;
        }

        ctx.motion.last_observed = current;
        Decision::Reported { level: current, published }
    }
}
