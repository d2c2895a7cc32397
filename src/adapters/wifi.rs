//! WiFi station-mode adapter.
//!
//! Implements [`LinkPort`], the hexagonal boundary for network association.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stubs for host-side tests.
//!
//! ## Association
//!
//! [`WifiAdapter::begin`] is the blocking boot-time join: it polls for a
//! usable interface a fixed number of times and gives up without retrying.
//! After boot the link manager drives recovery through
//! [`LinkPort::reconnect`], which only issues a request and returns.

use log::{info, warn};

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::delay::FreeRtos;
#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi};

use crate::app::ports::LinkPort;
use crate::error::LinkError;

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), LinkError> {
    if ssid.is_empty() || ssid.len() > 32 {
        return Err(LinkError::InvalidSsid);
    }
    if !is_printable_ascii(ssid) {
        return Err(LinkError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), LinkError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(LinkError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    #[cfg(target_os = "espidf")]
    wifi: EspWifi<'static>,
    #[cfg(not(target_os = "espidf"))]
    sim_up: bool,
    /// Simulation: number of reconnect requests seen.
    #[cfg(not(target_os = "espidf"))]
    sim_reconnects: u32,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(wifi: EspWifi<'static>) -> Self {
        Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            wifi,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            sim_up: false,
            sim_reconnects: 0,
        }
    }

    pub fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), LinkError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        self.ssid.clear();
        self.ssid.push_str(ssid).map_err(|()| LinkError::InvalidSsid)?;
        self.password.clear();
        self.password
            .push_str(password)
            .map_err(|()| LinkError::InvalidPassword)?;
        info!("WiFi: credentials set (SSID='{}')", self.ssid);
        Ok(())
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    /// Blocking boot-time association: up to `attempts` polls, `poll_ms` apart.
    pub fn begin(&mut self, attempts: u32, poll_ms: u32) -> Result<(), LinkError> {
        if self.ssid.is_empty() {
            return Err(LinkError::InvalidSsid);
        }
        info!("Connecting to WiFi: {}", self.ssid);
        self.platform_begin()?;

        for attempt in 1..=attempts {
            if self.is_connected() {
                info!("WiFi connected (attempt {}/{})", attempt, attempts);
                self.log_link_info();
                return Ok(());
            }
            Self::delay_ms(poll_ms);
        }

        if self.is_connected() {
            self.log_link_info();
            return Ok(());
        }
        warn!("WiFi connection failed after {} polls", attempts);
        Err(LinkError::AssociationTimeout)
    }

    /// Signal strength of the current association, if any.
    pub fn rssi(&self) -> Option<i8> {
        if !self.is_connected() {
            return None;
        }
        self.platform_rssi()
    }

    fn log_link_info(&self) {
        match self.platform_ip() {
            Some(ip) => info!("IP Address: {}", ip),
            None => info!("IP Address: <unknown>"),
        }
        match self.rssi() {
            Some(rssi) => info!("Signal Strength (RSSI): {} dBm", rssi),
            None => info!("Signal Strength (RSSI): <unknown>"),
        }
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_begin(&mut self) -> Result<(), LinkError> {
        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPAWPA2Personal
        };
        let conf = Configuration::Client(ClientConfiguration {
            ssid: self
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| LinkError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| LinkError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        });
        self.wifi
            .set_configuration(&conf)
            .map_err(|e| LinkError::Driver(e.code()))?;
        self.wifi.start().map_err(|e| LinkError::Driver(e.code()))?;
        self.wifi.connect().map_err(|e| LinkError::Driver(e.code()))?;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_begin(&mut self) -> Result<(), LinkError> {
        self.sim_up = true;
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_ip(&self) -> Option<std::net::Ipv4Addr> {
        self.wifi.sta_netif().get_ip_info().ok().map(|info| info.ip)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_ip(&self) -> Option<std::net::Ipv4Addr> {
        self.sim_up.then_some(std::net::Ipv4Addr::new(192, 168, 1, 50))
    }

    #[cfg(target_os = "espidf")]
    fn platform_rssi(&self) -> Option<i8> {
        let mut ap_info = esp_idf_svc::sys::wifi_ap_record_t::default();
        // SAFETY: ap_info is a valid out-pointer for the duration of the call.
        let rc = unsafe { esp_idf_svc::sys::esp_wifi_sta_get_ap_info(&mut ap_info) };
        (rc == esp_idf_svc::sys::ESP_OK).then_some(ap_info.rssi)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_rssi(&self) -> Option<i8> {
        Some(-60)
    }

    #[cfg(target_os = "espidf")]
    fn delay_ms(ms: u32) {
        FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ms(_ms: u32) {}

    // ── Simulation hooks ──────────────────────────────────────

    #[cfg(not(target_os = "espidf"))]
    pub fn set_sim_link(&mut self, up: bool) {
        self.sim_up = up;
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn sim_reconnects(&self) -> u32 {
        self.sim_reconnects
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for WifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// LinkPort
// ───────────────────────────────────────────────────────────────

impl LinkPort for WifiAdapter {
    #[cfg(target_os = "espidf")]
    fn is_connected(&self) -> bool {
        self.wifi.is_up().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn is_connected(&self) -> bool {
        self.sim_up
    }

    #[cfg(target_os = "espidf")]
    fn reconnect(&mut self) {
        if let Err(e) = self.wifi.disconnect() {
            warn!("WiFi: disconnect before reconnect failed (rc={})", e.code());
        }
        if let Err(e) = self.wifi.connect() {
            warn!("WiFi: reconnect request failed (rc={})", e.code());
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn reconnect(&mut self) {
        self.sim_reconnects += 1;
        info!("WiFi(sim): reconnect requested ({})", self.sim_reconnects);
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
