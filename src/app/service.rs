//! Node service: the hexagonal core.
//!
//! [`NodeService`] owns the [`DeviceContext`] and the four loop components.
//! One call to [`tick`](NodeService::tick) is one loop iteration. All I/O
//! flows through port traits injected at the call site, so the service runs
//! unchanged against real peripherals or test mocks.
//!
//! ```text
//!  MotionInputPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                      │         NodeService          │
//!  AlarmOutputPort ◀── │ link · session · debounce ·  │ ◀─▶ SessionPort
//!         LinkPort ◀── │ publish                      │ ◀── ClockPort
//!                      └──────────────────────────────┘
//! ```

use log::info;

use crate::config::NodeConfig;

use super::context::{ConnectivityState, DeviceContext};
use super::debounce::{Decision, SensorDebouncer};
use super::events::NodeEvent;
use super::link::LinkManager;
use super::ports::{AlarmOutputPort, ClockPort, EventSink, LinkPort, MotionInputPort, SessionPort};
use super::publisher::EventPublisher;
use super::reconnect::ReconnectGate;
use super::session::{SessionManager, SessionOutcome};

/// Everything that happened in one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub link_reconnect_requested: bool,
    pub session: SessionOutcome,
    pub decision: Decision,
}

pub struct NodeService {
    config: NodeConfig,
    ctx: DeviceContext,
    link: LinkManager,
    session: SessionManager,
    debouncer: SensorDebouncer,
    publisher: EventPublisher,
    tick_count: u64,
}

impl NodeService {
    pub fn new(config: NodeConfig) -> Self {
        let gate = ReconnectGate::new(config.reconnect_delay_ms, config.reconnect_policy);
        Self {
            link: LinkManager::new(gate),
            session: SessionManager::new(gate, config.client_id, config.offline_policy),
            debouncer: SensorDebouncer::new(config.publish_interval_ms, config.offline_policy),
            publisher: EventPublisher::new(&config),
            ctx: DeviceContext::new(),
            config,
            tick_count: 0,
        }
    }

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&NodeEvent::Started {
            topic: self.publisher.topic(),
        });
        info!(
            "NodeService started (interval={}ms, reconnect={}ms, {:?}/{:?}/{:?})",
            self.config.publish_interval_ms,
            self.config.reconnect_delay_ms,
            self.config.reconnect_policy,
            self.config.clock_policy,
            self.config.offline_policy,
        );
    }

    /// One loop iteration: link → session → service → sensor.
    pub fn tick(
        &mut self,
        hw: &mut (impl MotionInputPort + AlarmOutputPort),
        link: &mut impl LinkPort,
        session: &mut impl SessionPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> TickReport {
        self.tick_count += 1;

        let link_reconnect_requested = self.link.ensure_link(&mut self.ctx, link, clock.uptime_ms(), sink);

        let session_outcome = self
            .session
            .ensure_session(&mut self.ctx, session, &self.publisher, clock, sink);

        self.session.service(&mut self.ctx, session, sink);

        let decision = self
            .debouncer
            .evaluate(&mut self.ctx, hw, session, &self.publisher, clock, sink);

        TickReport {
            link_reconnect_requested,
            session: session_outcome,
            decision,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn context(&self) -> &DeviceContext {
        &self.ctx
    }

    pub fn connectivity(&self) -> ConnectivityState {
        self.ctx.connectivity()
    }

    /// Loop iterations since start.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
