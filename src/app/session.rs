//! Session manager: broker connection supervision.
//!
//! Connect attempts share the reconnect gate with the link manager (see
//! [`ReconnectGate`]). A connect call may block the loop for the client's
//! connect timeout; sensor sampling waits for it.

use log::debug;

use crate::config::OfflinePolicy;
use crate::error::SessionError;

use super::context::{DeviceContext, SessionState};
use super::events::NodeEvent;
use super::ports::{ClockPort, EventSink, SessionPort};
use super::publisher::EventPublisher;
use super::reconnect::{Attempt, ReconnectGate};

/// Result of one [`SessionManager::ensure_session`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The session was already up; nothing done.
    AlreadyConnected,
    /// Down, but the reconnect gate is closed.
    Deferred,
    /// A connect attempt succeeded.
    Connected,
    /// A connect attempt failed with the given reason.
    Failed(SessionError),
}

#[derive(Debug, Clone)]
pub struct SessionManager {
    gate: ReconnectGate,
    client_id: &'static str,
    offline_policy: OfflinePolicy,
}

impl SessionManager {
    pub const fn new(gate: ReconnectGate, client_id: &'static str, offline_policy: OfflinePolicy) -> Self {
        Self {
            gate,
            client_id,
            offline_policy,
        }
    }

    /// Connect to the broker if the session is down and the gate allows.
    ///
    /// On success the liveness announcement is published immediately (best
    /// effort). Under [`OfflinePolicy::ReportOnReconnect`] the current motion
    /// level follows it when a trigger was missed while offline.
    pub fn ensure_session(
        &self,
        ctx: &mut DeviceContext,
        session: &mut impl SessionPort,
        publisher: &EventPublisher,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> SessionOutcome {
        if session.is_connected() {
            ctx.session = SessionState::Connected;
            return SessionOutcome::AlreadyConnected;
        }
        ctx.session = SessionState::Disconnected;

        let now_ms = clock.uptime_ms();
        if !self.gate.try_acquire(&mut ctx.timers, Attempt::Session, now_ms) {
            return SessionOutcome::Deferred;
        }

        sink.emit(&NodeEvent::SessionConnecting);
        if let Err(e) = session.connect(self.client_id) {
            sink.emit(&NodeEvent::SessionConnectFailed(e));
            return SessionOutcome::Failed(e);
        }

        ctx.session = SessionState::Connected;
        sink.emit(&NodeEvent::SessionConnected);

        // Best effort: the outcome is already logged by the publisher.
        let _ = publisher.announce_online(session, clock, sink);

        if self.offline_policy == OfflinePolicy::ReportOnReconnect && ctx.motion.missed_while_offline {
            debug!("session: reporting motion state missed while offline");
            let _ = publisher.publish(ctx.motion.last_observed, session, clock, sink);
            ctx.timers.last_publish_ms = clock.uptime_ms();
            ctx.motion.missed_while_offline = false;
        }

        SessionOutcome::Connected
    }

    /// Drive the client's protocol pump. Must run every iteration.
    /// Records a protocol-level disconnect in [`SessionState`].
    pub fn service(&self, ctx: &mut DeviceContext, session: &mut impl SessionPort, sink: &mut impl EventSink) {
        let up = session.service();
        if !up && ctx.session == SessionState::Connected {
            sink.emit(&NodeEvent::SessionLost);
        }
        ctx.session = SessionState::from(up);
    }
}
