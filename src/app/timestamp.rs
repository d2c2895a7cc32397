//! ISO-8601 timestamps for outbound records.
//!
//! Local time is the synced system clock shifted by a fixed UTC offset and
//! rendered as `%Y-%m-%dT%H:%M:%SZ`. The trailing `Z` follows local time
//! rather than UTC; subscribers already parse it that way.
//!
//! Until SNTP completes the system clock sits near the epoch. Anything
//! before 2020-01-01 is treated as unsynced and replaced by
//! [`SENTINEL_TIMESTAMP`], so timestamps are NOT monotonic across the sync
//! boundary.

use core::fmt::Write;

use chrono::{DateTime, FixedOffset};

use super::ports::ClockPort;

/// Placeholder emitted while the wall clock is not valid.
pub const SENTINEL_TIMESTAMP: &str = "2026-01-06T00:00:00Z";

/// Earliest Unix time accepted as a synced clock (2020-01-01T00:00:00Z).
pub const EPOCH_2020: i64 = 1_577_836_800;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Fixed-capacity ISO-8601 string.
pub type IsoTimestamp = heapless::String<32>;

/// A rendered timestamp and whether it came from a synced clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub text: IsoTimestamp,
    pub synced: bool,
}

impl Stamp {
    fn sentinel() -> Self {
        let mut text = IsoTimestamp::new();
        // 20 bytes always fit in 32.
        let _ = text.push_str(SENTINEL_TIMESTAMP);
        Self { text, synced: false }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

/// Current local time, or the sentinel when the clock is not synced.
pub fn now_iso8601(clock: &impl ClockPort, gmt_offset_secs: i32) -> Stamp {
    match format_local(clock.unix_time(), gmt_offset_secs) {
        Some(text) => Stamp { text, synced: true },
        None => Stamp::sentinel(),
    }
}

/// Render `unix_secs` shifted by `gmt_offset_secs`.
/// `None` if the time predates [`EPOCH_2020`] or cannot be represented.
pub fn format_local(unix_secs: i64, gmt_offset_secs: i32) -> Option<IsoTimestamp> {
    if unix_secs < EPOCH_2020 {
        return None;
    }
    let offset = FixedOffset::east_opt(gmt_offset_secs)?;
    let local = DateTime::from_timestamp(unix_secs, 0)?.with_timezone(&offset);

    let mut text = IsoTimestamp::new();
    write!(text, "{}", local.format(FORMAT)).ok()?;
    Some(text)
}
