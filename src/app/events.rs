//! Outbound diagnostic events.
//!
//! Domain components emit these through the
//! [`EventSink`](super::ports::EventSink) port. The production adapter
//! renders them as serial console lines; tests record them.

use crate::error::{PublishError, SessionError};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEvent<'a> {
    /// The service has started; carries the session topic.
    Started { topic: &'a str },

    /// The link was down and a disconnect-then-reconnect was requested.
    LinkReconnecting,

    /// A broker connect attempt is starting.
    SessionConnecting,

    /// The broker accepted the session.
    SessionConnected,

    /// The broker connect attempt failed.
    SessionConnectFailed(SessionError),

    /// A previously connected session dropped during servicing.
    SessionLost,

    /// A trigger fired with the input HIGH.
    MotionDetected,

    /// A trigger fired with the input LOW.
    MotionCleared,

    /// A payload was accepted by the session.
    Published { payload: &'a str },

    /// A payload could not be delivered; the sample is lost.
    PublishFailed(PublishError),
}
