//! Mock adapters for integration tests.
//!
//! One mock per port. Each records the calls it receives so tests can assert
//! on the full history without touching real GPIO or a real broker.

use std::cell::Cell;

use pirnode::app::events::NodeEvent;
use pirnode::app::ports::{
    AlarmOutputPort, ClockPort, EventSink, LinkPort, MotionInputPort, MotionLevel, SessionPort,
};
use pirnode::error::{PublishError, SessionError};

// ── MockHardware ──────────────────────────────────────────────

/// PIR input the test sets directly; relay writes are recorded.
pub struct MockHardware {
    pub input: MotionLevel,
    pub alarm_writes: Vec<MotionLevel>,
    pub reads: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            input: MotionLevel::Low,
            alarm_writes: Vec::new(),
            reads: 0,
        }
    }

    /// Current relay level (LOW until first written).
    pub fn alarm(&self) -> MotionLevel {
        self.alarm_writes.last().copied().unwrap_or(MotionLevel::Low)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionInputPort for MockHardware {
    fn read_motion(&mut self) -> MotionLevel {
        self.reads += 1;
        self.input
    }
}

impl AlarmOutputPort for MockHardware {
    fn set_alarm(&mut self, level: MotionLevel) {
        self.alarm_writes.push(level);
    }
}

// ── MockLink ──────────────────────────────────────────────────

/// Link that stays in whatever state the test puts it in; reconnect
/// requests are only counted.
pub struct MockLink {
    pub up: bool,
    pub reconnects: u32,
}

#[allow(dead_code)]
impl MockLink {
    pub fn up() -> Self {
        Self { up: true, reconnects: 0 }
    }

    pub fn down() -> Self {
        Self { up: false, reconnects: 0 }
    }
}

impl LinkPort for MockLink {
    fn is_connected(&self) -> bool {
        self.up
    }

    fn reconnect(&mut self) {
        self.reconnects += 1;
    }
}

// ── MockSession ───────────────────────────────────────────────

pub struct MockSession {
    pub connected: bool,
    /// When set, every connect attempt fails with this reason.
    pub refuse: Option<SessionError>,
    /// When set, every publish fails with this error.
    pub reject_publish: Option<PublishError>,
    pub connect_attempts: Vec<String>,
    pub published: Vec<(String, String)>,
    pub service_calls: u32,
}

#[allow(dead_code)]
impl MockSession {
    pub fn connected() -> Self {
        Self {
            connected: true,
            ..Self::disconnected()
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connected: false,
            refuse: None,
            reject_publish: None,
            connect_attempts: Vec::new(),
            published: Vec::new(),
            service_calls: 0,
        }
    }

    pub fn refusing(reason: SessionError) -> Self {
        Self {
            refuse: Some(reason),
            ..Self::disconnected()
        }
    }

    pub fn payloads(&self) -> Vec<&str> {
        self.published.iter().map(|(_, p)| p.as_str()).collect()
    }
}

impl SessionPort for MockSession {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connect(&mut self, client_id: &str) -> Result<(), SessionError> {
        self.connect_attempts.push(client_id.to_string());
        if let Some(reason) = self.refuse {
            self.connected = false;
            return Err(reason);
        }
        self.connected = true;
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError> {
        if !self.connected {
            return Err(PublishError::NotConnected);
        }
        if let Some(e) = self.reject_publish {
            return Err(e);
        }
        self.published.push((topic.to_string(), payload.to_string()));
        Ok(())
    }

    fn service(&mut self) -> bool {
        self.service_calls += 1;
        self.connected
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Manually advanced clock. `unix` of 0 means "never synced".
pub struct MockClock {
    pub uptime: Cell<u64>,
    pub unix: Cell<i64>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn unsynced(uptime_ms: u64) -> Self {
        Self {
            uptime: Cell::new(uptime_ms),
            unix: Cell::new(0),
        }
    }

    pub fn synced(uptime_ms: u64, unix: i64) -> Self {
        Self {
            uptime: Cell::new(uptime_ms),
            unix: Cell::new(unix),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.uptime.set(self.uptime.get() + ms);
        if self.unix.get() != 0 {
            self.unix.set(self.unix.get() + (ms / 1_000) as i64);
        }
    }

    pub fn set(&self, ms: u64) {
        self.uptime.set(ms);
    }
}

impl ClockPort for MockClock {
    fn uptime_ms(&self) -> u64 {
        self.uptime.get()
    }

    fn unix_time(&self) -> i64 {
        self.unix.get()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Owned copy of a [`NodeEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Started(String),
    LinkReconnecting,
    SessionConnecting,
    SessionConnected,
    SessionConnectFailed(SessionError),
    SessionLost,
    MotionDetected,
    MotionCleared,
    Published(String),
    PublishFailed(PublishError),
}

pub struct RecordingSink {
    pub events: Vec<Recorded>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, event: &Recorded) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &NodeEvent<'_>) {
        let recorded = match *event {
            NodeEvent::Started { topic } => Recorded::Started(topic.to_string()),
            NodeEvent::LinkReconnecting => Recorded::LinkReconnecting,
            NodeEvent::SessionConnecting => Recorded::SessionConnecting,
            NodeEvent::SessionConnected => Recorded::SessionConnected,
            NodeEvent::SessionConnectFailed(e) => Recorded::SessionConnectFailed(e),
            NodeEvent::SessionLost => Recorded::SessionLost,
            NodeEvent::MotionDetected => Recorded::MotionDetected,
            NodeEvent::MotionCleared => Recorded::MotionCleared,
            NodeEvent::Published { payload } => Recorded::Published(payload.to_string()),
            NodeEvent::PublishFailed(e) => Recorded::PublishFailed(e),
        };
        self.events.push(recorded);
    }
}
