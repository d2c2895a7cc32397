//! Wire records published on the motion topic.
//!
//! Compact JSON; serde emits struct fields in declaration order, which is
//! the documented key order. `time_synced` only appears under
//! [`ClockPolicy::MarkUncertain`](crate::config::ClockPolicy::MarkUncertain)
//! when the sentinel timestamp was used.

use serde::Serialize;

use super::ports::MotionLevel;

pub const STATUS_ONLINE: &str = "online";

/// Liveness announcement sent right after a session comes up.
#[derive(Debug, Serialize)]
pub struct OnlineAnnouncement<'a> {
    pub timestamp: &'a str,
    pub motion: u8,
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_synced: Option<bool>,
}

impl<'a> OnlineAnnouncement<'a> {
    pub fn new(timestamp: &'a str) -> Self {
        Self {
            timestamp,
            motion: 0,
            status: STATUS_ONLINE,
            time_synced: None,
        }
    }
}

/// One motion sample.
#[derive(Debug, Serialize)]
pub struct MotionEvent<'a> {
    pub timestamp: &'a str,
    pub motion: u8,
    pub sensor_id: &'a str,
    pub location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_synced: Option<bool>,
}

impl<'a> MotionEvent<'a> {
    pub fn new(timestamp: &'a str, motion: MotionLevel, sensor_id: &'a str, location: &'a str) -> Self {
        Self {
            timestamp,
            motion: motion.as_u8(),
            sensor_id,
            location,
            time_synced: None,
        }
    }
}
