//! PIR Node Firmware: Main Entry Point
//!
//! Hexagonal architecture with a fixed-rate supervision loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter     WifiAdapter   MqttAdapter   Esp32Clock    │
//! │  (Motion+Alarm)      (LinkPort)    (SessionPort) (ClockPort)   │
//! │  LogEventSink        TimeSync                                  │
//! │  (EventSink)         (SNTP)                                    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              NodeService (pure logic)                  │    │
//! │  │  Link · Session · Debounce · Publish                   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  LoopScheduler (50 ms fixed rate) · Watchdog                   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::prelude::Peripherals;
use esp_idf_svc::wifi::EspWifi;
use log::{info, warn};

use pirnode::adapters::hardware::HardwareAdapter;
use pirnode::adapters::log_sink::LogEventSink;
use pirnode::adapters::mqtt::MqttAdapter;
use pirnode::adapters::sntp::TimeSync;
use pirnode::adapters::time::Esp32Clock;
use pirnode::adapters::wifi::WifiAdapter;
use pirnode::app::ports::ClockPort;
use pirnode::app::service::NodeService;
use pirnode::config::{self, NodeConfig};
use pirnode::drivers::pir::PirSensor;
use pirnode::drivers::relay::Relay;
use pirnode::drivers::watchdog::Watchdog;
use pirnode::pins;
use pirnode::scheduler::LoopScheduler;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PIR Motion Node v{}              ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = NodeConfig::default();

    // ── 2. GPIO: PIR input, relay output driven LOW ───────────
    let pir = PirSensor::new(pins::PIR_GPIO)?;
    let relay = Relay::new(pins::RELAY_GPIO)?;
    let mut hw = HardwareAdapter::new(pir, relay);
    info!(
        "GPIO configured: PIR=GPIO{} relay=GPIO{} (LOW)",
        pins::PIR_GPIO,
        pins::RELAY_GPIO
    );

    // ── 3. WiFi STA, blocking boot association ────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let esp_wifi = EspWifi::new(peripherals.modem, sysloop, None)?;
    let mut wifi = WifiAdapter::new(esp_wifi);
    wifi.set_credentials(config::WIFI_SSID, config::WIFI_PASSWORD)?;
    if let Err(e) = wifi.begin(config::WIFI_BOOT_ATTEMPTS, config::WIFI_BOOT_POLL_MS) {
        // Not fatal: the link manager keeps retrying from the loop.
        warn!("WiFi connection failed: {}", e);
    }

    // ── 4. MQTT client + SNTP ─────────────────────────────────
    let mut mqtt = MqttAdapter::new(config.broker, config.port, config::MQTT_CONNECT_TIMEOUT_MS)?;
    info!("MQTT server: {}:{} topic={}", config.broker, config.port, config.topic);

    let time_sync = match TimeSync::start(config::NTP_SERVER) {
        Ok(sync) => Some(sync),
        Err(e) => {
            warn!("{}; timestamps stay unsynced", e);
            None
        }
    };
    let mut time_synced = false;

    // ── 5. Core service ───────────────────────────────────────
    let clock = Esp32Clock::new();
    let watchdog = Watchdog::new(config::WATCHDOG_TIMEOUT_MS);
    let mut sink = LogEventSink::new();
    let mut scheduler = LoopScheduler::new(config.loop_period_ms);
    let mut service = NodeService::new(config);
    service.start(&mut sink);

    // ── 6. Supervision loop ───────────────────────────────────
    loop {
        service.tick(&mut hw, &mut wifi, &mut mqtt, &clock, &mut sink);
        watchdog.feed();

        if !time_synced && time_sync.as_ref().is_some_and(TimeSync::is_synced) {
            time_synced = true;
            info!("Time synchronised (unix={})", clock.unix_time());
        }

        let wait_ms = scheduler.next_wait(clock.uptime_ms());
        if wait_ms > 0 {
            FreeRtos::delay_ms(wait_ms as u32);
        }
    }
}
