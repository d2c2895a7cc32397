//! Unified error types for the PIR node firmware.
//!
//! A single `Error` enum that every subsystem converts into. All variants are
//! `Copy` so they can be passed through the loop without allocation. Nothing
//! in the control loop is fatal: every error degrades to "retry next tick" or
//! "drop this sample".

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Network association could not be (re)established.
    Link(LinkError),
    /// Broker session could not be established.
    Session(SessionError),
    /// A message could not be handed to the session.
    Publish(PublishError),
    /// The wall clock is not usable.
    Clock(ClockError),
    /// A GPIO read or write failed.
    Gpio(&'static str),
    /// Peripheral or driver initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Session(e) => write!(f, "session: {e}"),
            Self::Publish(e) => write!(f, "publish: {e}"),
            Self::Clock(e) => write!(f, "clock: {e}"),
            Self::Gpio(msg) => write!(f, "gpio: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Link errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    InvalidSsid,
    InvalidPassword,
    /// Boot-time association did not complete within the poll budget.
    AssociationTimeout,
    /// The network driver rejected the request.
    Driver(i32),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::AssociationTimeout => write!(f, "association timed out"),
            Self::Driver(rc) => write!(f, "driver error (rc={rc})"),
        }
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

// ---------------------------------------------------------------------------
// Session errors
// ---------------------------------------------------------------------------

/// Reason a broker connect attempt failed.
///
/// Discriminants are the classic MQTT client state codes, which is what the
/// diagnostic log prints as `RC=`. The ESP-IDF client does not hand the
/// CONNACK return code to its event callback, so on the device a refused
/// connect reports `ConnectFailed` (-2) and a stalled one
/// `ConnectionTimeout` (-4). The broker refusal codes 1..=5 are produced
/// by session implementations that do see the CONNACK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum SessionError {
    ConnectionTimeout = -4,
    ConnectionLost = -3,
    ConnectFailed = -2,
    Disconnected = -1,
    BadProtocol = 1,
    BadClientId = 2,
    Unavailable = 3,
    BadCredentials = 4,
    Unauthorized = 5,
}

impl SessionError {
    /// Numeric reason code.
    pub const fn code(self) -> i8 {
        self as i8
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            Self::ConnectionTimeout => "connection timeout",
            Self::ConnectionLost => "connection lost",
            Self::ConnectFailed => "connect failed",
            Self::Disconnected => "disconnected",
            Self::BadProtocol => "bad protocol",
            Self::BadClientId => "bad client id",
            Self::Unavailable => "server unavailable",
            Self::BadCredentials => "bad credentials",
            Self::Unauthorized => "unauthorized",
        };
        write!(f, "{what} (RC={})", self.code())
    }
}

impl From<SessionError> for Error {
    fn from(e: SessionError) -> Self {
        Self::Session(e)
    }
}

// ---------------------------------------------------------------------------
// Publish errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishError {
    /// No broker session.
    NotConnected,
    /// The client refused the message (buffer full, socket error).
    Rejected,
    /// Serialisation of the record failed.
    Encode,
    /// Suppressed because the wall clock is not synced.
    ClockUnsynced,
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::Rejected => write!(f, "rejected by client"),
            Self::Encode => write!(f, "payload encoding failed"),
            Self::ClockUnsynced => write!(f, "clock not synced"),
        }
    }
}

impl From<PublishError> for Error {
    fn from(e: PublishError) -> Self {
        Self::Publish(e)
    }
}

// ---------------------------------------------------------------------------
// Clock errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// SNTP has not completed; system time is still near the epoch.
    NotSynced,
    /// SNTP service could not be started.
    SntpInit,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSynced => write!(f, "time not synced"),
            Self::SntpInit => write!(f, "SNTP init failed"),
        }
    }
}

impl From<ClockError> for Error {
    fn from(e: ClockError) -> Self {
        Self::Clock(e)
    }
}

impl core::error::Error for Error {}
impl core::error::Error for LinkError {}
impl core::error::Error for SessionError {}
impl core::error::Error for PublishError {}
impl core::error::Error for ClockError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
