//! Event publisher: builds, serialises and submits records.
//!
//! Failures are reported through the [`EventSink`] and returned, never
//! retried: there is no queue, a failed sample is simply lost.

use crate::config::{ClockPolicy, NodeConfig};
use crate::error::PublishError;

use super::events::NodeEvent;
use super::payload::{MotionEvent, OnlineAnnouncement};
use super::ports::{ClockPort, EventSink, MotionLevel, SessionPort};
use super::timestamp::{Stamp, now_iso8601};

#[derive(Debug, Clone)]
pub struct EventPublisher {
    topic: &'static str,
    sensor_id: &'static str,
    location: &'static str,
    gmt_offset_secs: i32,
    clock_policy: ClockPolicy,
}

impl EventPublisher {
    pub fn new(config: &NodeConfig) -> Self {
        Self {
            topic: config.topic,
            sensor_id: config.client_id,
            location: config.location,
            gmt_offset_secs: config.gmt_offset_secs,
            clock_policy: config.clock_policy,
        }
    }

    pub fn topic(&self) -> &'static str {
        self.topic
    }

    /// Publish one motion sample.
    pub fn publish(
        &self,
        motion: MotionLevel,
        session: &mut impl SessionPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<(), PublishError> {
        let payload = self.timestamp(clock).and_then(|stamp| {
            let mut record = MotionEvent::new(stamp.as_str(), motion, self.sensor_id, self.location);
            record.time_synced = self.uncertainty_flag(&stamp);
            serde_json::to_string(&record).map_err(|_| PublishError::Encode)
        });
        self.submit(payload, session, sink)
    }

    /// Publish the liveness announcement (`motion=0`, `status="online"`).
    pub fn announce_online(
        &self,
        session: &mut impl SessionPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<(), PublishError> {
        let payload = self.timestamp(clock).and_then(|stamp| {
            let mut record = OnlineAnnouncement::new(stamp.as_str());
            record.time_synced = self.uncertainty_flag(&stamp);
            serde_json::to_string(&record).map_err(|_| PublishError::Encode)
        });
        self.submit(payload, session, sink)
    }

    fn timestamp(&self, clock: &impl ClockPort) -> Result<Stamp, PublishError> {
        let stamp = now_iso8601(clock, self.gmt_offset_secs);
        if !stamp.synced && self.clock_policy == ClockPolicy::Suppress {
            return Err(PublishError::ClockUnsynced);
        }
        Ok(stamp)
    }

    fn uncertainty_flag(&self, stamp: &Stamp) -> Option<bool> {
        (self.clock_policy == ClockPolicy::MarkUncertain && !stamp.synced).then_some(false)
    }

    fn submit(
        &self,
        payload: Result<String, PublishError>,
        session: &mut impl SessionPort,
        sink: &mut impl EventSink,
    ) -> Result<(), PublishError> {
        let result = payload.and_then(|p| {
            session.publish(self.topic, &p)?;
            sink.emit(&NodeEvent::Published { payload: &p });
            Ok(())
        });
        if let Err(e) = result {
            sink.emit(&NodeEvent::PublishFailed(e));
        }
        result
    }
}
