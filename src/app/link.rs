//! Link manager: keeps the network association alive.

use super::context::{DeviceContext, LinkState};
use super::events::NodeEvent;
use super::ports::{EventSink, LinkPort};
use super::reconnect::{Attempt, ReconnectGate};

#[derive(Debug, Clone, Copy)]
pub struct LinkManager {
    gate: ReconnectGate,
}

impl LinkManager {
    pub const fn new(gate: ReconnectGate) -> Self {
        Self { gate }
    }

    /// Refresh [`LinkState`] from the stack and, if the link is down and the
    /// gate allows it, request a disconnect-then-reconnect.
    ///
    /// Returns whether a reconnect was requested. Failure to associate is
    /// not reported here; it shows up as a still-down link on a later tick.
    pub fn ensure_link(
        &self,
        ctx: &mut DeviceContext,
        link: &mut impl LinkPort,
        now_ms: u64,
        sink: &mut impl EventSink,
    ) -> bool {
        ctx.link = LinkState::from(link.is_connected());
        if ctx.link == LinkState::Connected {
            return false;
        }
        if !self.gate.try_acquire(&mut ctx.timers, Attempt::Link, now_ms) {
            return false;
        }
        sink.emit(&NodeEvent::LinkReconnecting);
        link.reconnect();
        true
    }
}
