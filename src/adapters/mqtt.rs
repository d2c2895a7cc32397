//! MQTT session adapter.
//!
//! Implements [`SessionPort`] over the ESP-IDF MQTT client.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `EspMqttClient` with an event callback that
//!   tracks connection status in an atomic.
//! - **all other targets**: an in-memory broker for host-side tests.
//!
//! ## Session model
//!
//! A connect is a blocking handshake bounded by the configured timeout. The
//! ESP-IDF client reconnects on its own; that is disabled here by dropping
//! the client as soon as [`SessionPort::service`] sees the session down, so
//! every reconnect goes through the session manager and its gate.
//!
//! The event callback only learns that the handshake failed, never the
//! CONNACK return code, so a refusal surfaces as `ConnectFailed` (RC=-2) and
//! a stall as `ConnectionTimeout` (RC=-4). See [`Handshake::outcome`].

use core::fmt::Write as _;

use log::{info, warn};

#[cfg(target_os = "espidf")]
use std::sync::Arc;
#[cfg(target_os = "espidf")]
use std::sync::atomic::{AtomicU8, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::delay::FreeRtos;
#[cfg(target_os = "espidf")]
use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};

use crate::app::ports::SessionPort;
use crate::error::{Error, PublishError, SessionError};

pub type BrokerUrl = heapless::String<96>;

/// Connection status as last reported by the client's event callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Handshake {
    Pending = 0,
    Connected = 1,
    Disconnected = 2,
    Error = 3,
}

impl Handshake {
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Pending,
            1 => Self::Connected,
            2 => Self::Disconnected,
            _ => Self::Error,
        }
    }

    /// Result of a connect once the wait is over. `Pending` at that point
    /// means the broker never answered.
    pub const fn outcome(self) -> Result<(), SessionError> {
        match self {
            Self::Connected => Ok(()),
            Self::Disconnected | Self::Error => Err(SessionError::ConnectFailed),
            Self::Pending => Err(SessionError::ConnectionTimeout),
        }
    }
}

#[cfg(target_os = "espidf")]
const CONNECT_POLL_MS: u32 = 10;

/// `mqtt://host:port`
pub fn broker_url(host: &str, port: u16) -> Result<BrokerUrl, Error> {
    let mut url = BrokerUrl::new();
    write!(url, "mqtt://{}:{}", host, port).map_err(|_| Error::Init("broker URL too long"))?;
    Ok(url)
}

pub struct MqttAdapter {
    url: BrokerUrl,
    #[cfg(target_os = "espidf")]
    connect_timeout_ms: u32,
    #[cfg(target_os = "espidf")]
    client: Option<EspMqttClient<'static>>,
    #[cfg(target_os = "espidf")]
    status: Arc<AtomicU8>,
    #[cfg(not(target_os = "espidf"))]
    sim: SimBroker,
}

impl MqttAdapter {
    pub fn new(host: &str, port: u16, connect_timeout_ms: u32) -> Result<Self, Error> {
        let url = broker_url(host, port)?;
        info!("MQTT: broker {} (connect timeout {}ms)", url, connect_timeout_ms);
        Ok(Self {
            url,
            #[cfg(target_os = "espidf")]
            connect_timeout_ms,
            #[cfg(target_os = "espidf")]
            client: None,
            #[cfg(target_os = "espidf")]
            status: Arc::new(AtomicU8::new(Handshake::Disconnected as u8)),
            #[cfg(not(target_os = "espidf"))]
            sim: SimBroker::default(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF implementation
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
impl MqttAdapter {
    fn status(&self) -> Handshake {
        Handshake::from_u8(self.status.load(Ordering::Acquire))
    }

    fn wait_for_connack(&self) -> Result<(), SessionError> {
        let mut waited = 0;
        while waited < self.connect_timeout_ms && self.status() == Handshake::Pending {
            FreeRtos::delay_ms(CONNECT_POLL_MS);
            waited += CONNECT_POLL_MS;
        }
        self.status().outcome()
    }
}

#[cfg(target_os = "espidf")]
impl SessionPort for MqttAdapter {
    fn is_connected(&self) -> bool {
        self.client.is_some() && self.status() == Handshake::Connected
    }

    fn connect(&mut self, client_id: &str) -> Result<(), SessionError> {
        self.client = None;
        self.status.store(Handshake::Pending as u8, Ordering::Release);

        let conf = MqttClientConfiguration {
            client_id: Some(client_id),
            ..Default::default()
        };
        let status = Arc::clone(&self.status);
        let client = EspMqttClient::new_cb(self.url.as_str(), &conf, move |event| {
            let next = match event.payload() {
                EventPayload::Connected(_) => Handshake::Connected,
                EventPayload::Disconnected => Handshake::Disconnected,
                EventPayload::Error(_) => Handshake::Error,
                _ => return,
            };
            status.store(next as u8, Ordering::Release);
        })
        .map_err(|e| {
            warn!("MQTT: client init failed (rc={})", e.code());
            SessionError::ConnectFailed
        })?;

        // Dropping the client on failure tears down its task and socket.
        self.wait_for_connack()?;
        self.client = Some(client);
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError> {
        if self.status() != Handshake::Connected {
            return Err(PublishError::NotConnected);
        }
        let client = self.client.as_mut().ok_or(PublishError::NotConnected)?;
        client
            .publish(topic, QoS::AtMostOnce, false, payload.as_bytes())
            .map(|_| ())
            .map_err(|e| {
                warn!("MQTT: publish failed (rc={})", e.code());
                PublishError::Rejected
            })
    }

    fn service(&mut self) -> bool {
        if self.client.is_none() {
            return false;
        }
        if self.status() != Handshake::Connected {
            self.client = None;
            return false;
        }
        true
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

/// In-memory broker used on host targets.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SimBroker {
    refuse: Option<SessionError>,
    handshake: Option<Handshake>,
    connected: bool,
    client_id: String,
    published: Vec<(String, String)>,
}

#[cfg(not(target_os = "espidf"))]
impl MqttAdapter {
    /// Make subsequent connects fail with `reason` (or succeed with `None`).
    pub fn set_sim_refusal(&mut self, reason: Option<SessionError>) {
        self.sim.refuse = reason;
    }

    /// Status the client callback reports for subsequent connects
    /// (`None` for a normal CONNACK).
    pub fn set_sim_handshake(&mut self, handshake: Option<Handshake>) {
        self.sim.handshake = handshake;
    }

    /// Simulate the broker dropping the session.
    pub fn sim_drop(&mut self) {
        if self.sim.connected {
            warn!("MQTT(sim): session dropped by broker");
        }
        self.sim.connected = false;
    }

    pub fn sim_client_id(&self) -> &str {
        &self.sim.client_id
    }

    pub fn sim_published(&self) -> &[(String, String)] {
        &self.sim.published
    }
}

#[cfg(not(target_os = "espidf"))]
impl SessionPort for MqttAdapter {
    fn is_connected(&self) -> bool {
        self.sim.connected
    }

    fn connect(&mut self, client_id: &str) -> Result<(), SessionError> {
        if let Some(reason) = self.sim.refuse {
            self.sim.connected = false;
            return Err(reason);
        }
        let outcome = self.sim.handshake.unwrap_or(Handshake::Connected).outcome();
        if let Err(e) = outcome {
            self.sim.connected = false;
            return Err(e);
        }
        self.sim.client_id = client_id.to_string();
        self.sim.connected = true;
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &str) -> Result<(), PublishError> {
        if !self.sim.connected {
            return Err(PublishError::NotConnected);
        }
        self.sim.published.push((topic.to_string(), payload.to_string()));
        Ok(())
    }

    fn service(&mut self) -> bool {
        self.sim.connected
    }
}
