//! Alarm relay output.
//!
//! Active HIGH. The relay is forced LOW at construction so the alarm is
//! silent until the first sensor sample says otherwise.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives a GPIO output through `PinDriver`.
//! On host/test: tracks state in-memory only.

use log::{info, warn};

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio::{AnyOutputPin, Output, PinDriver};

use crate::error::Error;

pub struct Relay {
    gpio: i32,
    energised: bool,
    #[cfg(target_os = "espidf")]
    pin: PinDriver<'static, AnyOutputPin, Output>,
}

impl Relay {
    #[cfg(target_os = "espidf")]
    pub fn new(gpio: i32) -> Result<Self, Error> {
        // SAFETY: the pin number comes from `pins` and is claimed once at boot.
        let pin = unsafe { AnyOutputPin::new(gpio) };
        let pin = PinDriver::output(pin).map_err(|_| Error::Init("relay output pin"))?;
        let mut relay = Self {
            gpio,
            energised: true,
            pin,
        };
        relay.set(false);
        info!("Relay: output on GPIO{} (LOW)", gpio);
        Ok(relay)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(gpio: i32) -> Result<Self, Error> {
        info!("Relay(sim): output on GPIO{} (LOW)", gpio);
        Ok(Self { gpio, energised: false })
    }

    pub fn set(&mut self, on: bool) {
        if let Err(e) = self.write_hw(on) {
            warn!("Relay: GPIO{} write failed: {}", self.gpio, e);
            return;
        }
        self.energised = on;
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_on(&self) -> bool {
        self.energised
    }

    #[cfg(target_os = "espidf")]
    fn write_hw(&mut self, on: bool) -> Result<(), Error> {
        let res = if on { self.pin.set_high() } else { self.pin.set_low() };
        res.map_err(|_| Error::Gpio("relay write"))
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_hw(&mut self, _on: bool) -> Result<(), Error> {
        Ok(())
    }
}
