//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing node events to the ESP-IDF logger
//! (UART in production). Every line is prefixed with its subsystem tag.

use log::{info, warn};

use crate::app::events::NodeEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`NodeEvent`] to the serial console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &NodeEvent<'_>) {
        match event {
            NodeEvent::Started { topic } => {
                info!("START | System ready (topic={})", topic);
            }
            NodeEvent::LinkReconnecting => {
                warn!("WIFI  | reconnecting...");
            }
            NodeEvent::SessionConnecting => {
                info!("MQTT  | connecting to broker...");
            }
            NodeEvent::SessionConnected => {
                info!("MQTT  | connected");
            }
            NodeEvent::SessionConnectFailed(e) => {
                warn!("MQTT  | connect failed, RC={} ({})", e.code(), e);
            }
            NodeEvent::SessionLost => {
                warn!("MQTT  | session lost");
            }
            NodeEvent::MotionDetected => {
                info!("MOTION | MOTION DETECTED");
            }
            NodeEvent::MotionCleared => {
                info!("MOTION | No motion");
            }
            NodeEvent::Published { payload } => {
                info!("MQTT  | published: {}", payload);
            }
            NodeEvent::PublishFailed(e) => {
                warn!("MQTT  | publish failed: {}", e);
            }
        }
    }
}
