//! HC-SR501 PIR sensor input.
//!
//! The module drives its output HIGH while motion is present (retrigger
//! mode). No debouncing is done here; the sensor's own hold time does that.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads a GPIO input through `PinDriver`.
//! On host/test: returns a level set with [`PirSensor::set_sim_level`].

use log::info;

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio::{AnyInputPin, Input, PinDriver};

use crate::error::Error;

pub struct PirSensor {
    gpio: i32,
    #[cfg(target_os = "espidf")]
    pin: PinDriver<'static, AnyInputPin, Input>,
    #[cfg(not(target_os = "espidf"))]
    sim_high: bool,
}

impl PirSensor {
    #[cfg(target_os = "espidf")]
    pub fn new(gpio: i32) -> Result<Self, Error> {
        // SAFETY: the pin number comes from `pins` and is claimed once at boot.
        let pin = unsafe { AnyInputPin::new(gpio) };
        let pin = PinDriver::input(pin).map_err(|_| Error::Init("PIR input pin"))?;
        info!("PIR: input on GPIO{}", gpio);
        Ok(Self { gpio, pin })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(gpio: i32) -> Result<Self, Error> {
        info!("PIR(sim): input on GPIO{}", gpio);
        Ok(Self { gpio, sim_high: false })
    }

    /// `true` while the sensor reports motion.
    #[cfg(target_os = "espidf")]
    pub fn is_high(&self) -> bool {
        self.pin.is_high()
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn is_high(&self) -> bool {
        self.sim_high
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn set_sim_level(&mut self, high: bool) {
        self.sim_high = high;
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}
