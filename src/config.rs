//! Node configuration.
//!
//! Every parameter is a compile-time constant: there is no runtime
//! configuration source (no NVS, no provisioning, no environment).
//! [`NodeConfig`] bundles the constants with the behaviour policies so
//! the application core can be exercised with alternative policies in tests.

// --- Network link ---
/// Access point the node associates with.
pub const WIFI_SSID: &str = "Hoang Minh";
/// WPA2 pre-shared passphrase.
pub const WIFI_PASSWORD: &str = "99999999";
/// Number of status polls during the boot-time association.
pub const WIFI_BOOT_ATTEMPTS: u32 = 20;
/// Delay between boot-time association polls (milliseconds).
pub const WIFI_BOOT_POLL_MS: u32 = 500;

// --- Messaging session ---
pub const MQTT_BROKER: &str = "test.mosquitto.org";
pub const MQTT_PORT: u16 = 1883;
pub const MQTT_TOPIC: &str = "iot/security/pir/nhom03";
/// Client identity; doubles as the `sensor_id` field of motion events.
pub const MQTT_CLIENT_ID: &str = "ESP32_Nhom03_HoangMinh";
/// Upper bound on a blocking connect call (milliseconds).
pub const MQTT_CONNECT_TIMEOUT_MS: u32 = 5_000;

/// Fixed location label carried by every motion event.
pub const SENSOR_LOCATION: &str = "living_room";

// --- Time ---
pub const NTP_SERVER: &str = "pool.ntp.org";
/// Local time offset from UTC (UTC+7), no daylight saving.
pub const GMT_OFFSET_SECS: i32 = 7 * 3600;

// --- Timing ---
/// Heartbeat cadence while motion persists (milliseconds).
pub const PUBLISH_INTERVAL_MS: u64 = 200;
/// Minimum spacing between reconnect attempts (milliseconds).
pub const RECONNECT_DELAY_MS: u64 = 5_000;
/// Main loop tick period (milliseconds).
pub const LOOP_PERIOD_MS: u64 = 50;
/// Task watchdog timeout; must exceed the MQTT connect timeout.
pub const WATCHDOG_TIMEOUT_MS: u32 = 15_000;

/// How link and session reconnect attempts are rate limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectPolicy {
    /// One timer gates both link and session attempts: they can never both
    /// fire inside the same delay window.
    Shared,
    /// Link and session each have their own timer.
    Independent,
}

/// What to do with timestamps while the wall clock has not been synced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPolicy {
    /// Publish with the fixed sentinel timestamp.
    Sentinel,
    /// Do not publish until the clock is valid.
    Suppress,
    /// Publish with the sentinel and add `"time_synced":false`.
    MarkUncertain,
}

/// Handling of triggers that fire while the session is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfflinePolicy {
    /// The sample is lost.
    Drop,
    /// After the next session comes up, publish the current motion level
    /// once if any trigger was missed while offline.
    ReportOnReconnect,
}

/// Runtime view of the node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub topic: &'static str,
    pub client_id: &'static str,
    pub location: &'static str,
    pub broker: &'static str,
    pub port: u16,

    /// Heartbeat cadence while HIGH (milliseconds).
    pub publish_interval_ms: u64,
    /// Minimum reconnect spacing (milliseconds).
    pub reconnect_delay_ms: u64,
    /// Loop tick period (milliseconds).
    pub loop_period_ms: u64,
    /// Local time offset applied to timestamps (seconds east of UTC).
    pub gmt_offset_secs: i32,

    pub reconnect_policy: ReconnectPolicy,
    pub clock_policy: ClockPolicy,
    pub offline_policy: OfflinePolicy,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            topic: MQTT_TOPIC,
            client_id: MQTT_CLIENT_ID,
            location: SENSOR_LOCATION,
            broker: MQTT_BROKER,
            port: MQTT_PORT,

            publish_interval_ms: PUBLISH_INTERVAL_MS,
            reconnect_delay_ms: RECONNECT_DELAY_MS,
            loop_period_ms: LOOP_PERIOD_MS,
            gmt_offset_secs: GMT_OFFSET_SECS,

            reconnect_policy: ReconnectPolicy::Shared,
            clock_policy: ClockPolicy::Sentinel,
            offline_policy: OfflinePolicy::Drop,
        }
    }
}
