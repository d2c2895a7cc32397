//! SNTP time synchronisation.
//!
//! Starts the ESP-IDF SNTP service against a single server. Sync completes
//! in the background; until then the wall clock reads near the epoch and
//! timestamps fall back per the configured clock policy. The UTC offset is
//! applied when formatting, not here.

use log::{info, warn};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sntp::{EspSntp, SntpConf, SyncStatus};

use crate::error::ClockError;

pub struct TimeSync {
    server: &'static str,
    #[cfg(target_os = "espidf")]
    sntp: EspSntp<'static>,
}

impl TimeSync {
    #[cfg(target_os = "espidf")]
    pub fn start(server: &'static str) -> Result<Self, ClockError> {
        let mut conf = SntpConf::default();
        conf.servers[0] = server;
        let sntp = EspSntp::new(&conf).map_err(|e| {
            warn!("SNTP: init failed (rc={})", e.code());
            ClockError::SntpInit
        })?;
        info!("Time sync configured: {}", server);
        Ok(Self { server, sntp })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn start(server: &'static str) -> Result<Self, ClockError> {
        if server.is_empty() {
            warn!("SNTP(sim): no server");
            return Err(ClockError::SntpInit);
        }
        info!("Time sync configured (sim): {}", server);
        Ok(Self { server })
    }

    pub fn server(&self) -> &'static str {
        self.server
    }

    #[cfg(target_os = "espidf")]
    pub fn is_synced(&self) -> bool {
        self.sntp.get_sync_status() == SyncStatus::Completed
    }

    /// Host clocks are always synced.
    #[cfg(not(target_os = "espidf"))]
    pub fn is_synced(&self) -> bool {
        true
    }
}
