//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ NodeService (domain)
//! ```
//!
//! Driven adapters (GPIO, WiFi, MQTT client, system clock, log sink)
//! implement these traits. The [`NodeService`](super::service::NodeService)
//! consumes them via generics, so the domain core never touches hardware
//! or sockets directly.
//!
//! ## Blocking contract
//!
//! Every method here is a non-blocking read of cached state **except**
//! [`SessionPort::connect`], which may block for the client's bounded
//! connect timeout and stall the whole loop for that long.

use crate::error::{PublishError, SessionError};

use super::events::NodeEvent;

// ───────────────────────────────────────────────────────────────
// Motion level
// ───────────────────────────────────────────────────────────────

/// Binary level of the PIR input (and, mirrored, the relay output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionLevel {
    /// No motion.
    #[default]
    Low,
    /// Motion present.
    High,
}

impl MotionLevel {
    /// Wire value used in payloads: 0 or 1.
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::High => 1,
        }
    }

    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl From<bool> for MotionLevel {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

// ───────────────────────────────────────────────────────────────
// GPIO ports (driven adapter: hardware ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: sample the motion input once.
pub trait MotionInputPort {
    fn read_motion(&mut self) -> MotionLevel;
}

/// Write-side port: drive the local alarm output.
pub trait AlarmOutputPort {
    /// Assert (`High`) or deassert (`Low`) the output.
    fn set_alarm(&mut self, level: MotionLevel);
}

// ───────────────────────────────────────────────────────────────
// Network link port (driven adapter: domain → WiFi stack)
// ───────────────────────────────────────────────────────────────

/// The network association, owned by the platform network stack.
pub trait LinkPort {
    /// Cached association status (associated and holding an IP).
    fn is_connected(&self) -> bool;

    /// Request disconnect-then-reconnect. Returns immediately; association
    /// completes out of band and failures surface only through
    /// [`is_connected`](Self::is_connected).
    fn reconnect(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Messaging session port (driven adapter: domain → MQTT client)
// ───────────────────────────────────────────────────────────────

/// A publish/subscribe client session with a single broker.
pub trait SessionPort {
    /// Cached session status.
    fn is_connected(&self) -> bool;

    /// Synchronous connect with the given client identity.
    /// Blocks for at most the client's connect timeout.
    fn connect(&mut self, client_id: &str) -> Result<(), SessionError>;

    /// Hand a UTF-8 payload to the client for delivery on `topic`.
    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError>;

    /// Drive the client's keep-alive / read pump.
    /// Returns whether the session is still up afterwards.
    fn service(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic uptime plus the (possibly unsynced) wall clock.
pub trait ClockPort {
    /// Milliseconds since boot. Monotonic.
    fn uptime_ms(&self) -> u64;

    /// Seconds since the Unix epoch as currently held by the system clock.
    /// Before SNTP completes this is close to zero.
    fn unix_time(&self) -> i64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → diagnostics)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`NodeEvent`]s through this port. Adapters decide
/// where they go (serial console in production, a recorder in tests).
pub trait EventSink {
    fn emit(&mut self, event: &NodeEvent<'_>);
}
