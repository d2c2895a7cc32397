//! Device context: every piece of mutable loop state in one place.
//!
//! Owned by [`NodeService`](super::service::NodeService) and handed to each
//! component by `&mut`. Nothing here survives a reboot.

use super::ports::MotionLevel;

/// Network association as last reported by the network stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    #[default]
    Disconnected,
    Connected,
}

/// Broker session as last observed by connect attempts and servicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connected,
}

impl From<bool> for LinkState {
    fn from(up: bool) -> Self {
        if up { Self::Connected } else { Self::Disconnected }
    }
}

impl From<bool> for SessionState {
    fn from(up: bool) -> Self {
        if up { Self::Connected } else { Self::Disconnected }
    }
}

/// Composite view of link + session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityState {
    Disconnected,
    LinkUp,
    LinkUpSessionUp,
}

/// Debouncer memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionState {
    /// Level used by the most recent emitted-or-suppressed decision.
    pub last_observed: MotionLevel,
    /// A trigger fired while the session was down and has not been
    /// reported since.
    pub missed_while_offline: bool,
}

/// Monotonic timestamps (ms since boot) gating side effects.
/// Each is written only at the moment its gated action is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timers {
    pub last_publish_ms: u64,
    pub last_link_attempt_ms: u64,
    pub last_session_attempt_ms: u64,
}

/// All loop state.
#[derive(Debug, Clone, Default)]
pub struct DeviceContext {
    pub link: LinkState,
    pub session: SessionState,
    pub motion: MotionState,
    pub timers: Timers,
}

impl DeviceContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connectivity(&self) -> ConnectivityState {
        match (self.link, self.session) {
            (LinkState::Disconnected, _) => ConnectivityState::Disconnected,
            (LinkState::Connected, SessionState::Disconnected) => ConnectivityState::LinkUp,
            (LinkState::Connected, SessionState::Connected) => ConnectivityState::LinkUpSessionUp,
        }
    }

    pub fn session_up(&self) -> bool {
        self.session == SessionState::Connected
    }
}
