//! Hardware adapter: bridges the PIR input and alarm relay to domain ports.
//!
//! This is the only module in the system that touches GPIO. On non-espidf
//! targets the underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{AlarmOutputPort, MotionInputPort, MotionLevel};
use crate::drivers::pir::PirSensor;
use crate::drivers::relay::Relay;

pub struct HardwareAdapter {
    pir: PirSensor,
    relay: Relay,
}

impl HardwareAdapter {
    pub fn new(pir: PirSensor, relay: Relay) -> Self {
        Self { pir, relay }
    }

    pub fn pir_mut(&mut self) -> &mut PirSensor {
        &mut self.pir
    }

    pub fn relay(&self) -> &Relay {
        &self.relay
    }
}

// ── MotionInputPort implementation ────────────────────────────

impl MotionInputPort for HardwareAdapter {
    fn read_motion(&mut self) -> MotionLevel {
        MotionLevel::from(self.pir.is_high())
    }
}

// ── AlarmOutputPort implementation ────────────────────────────

impl AlarmOutputPort for HardwareAdapter {
    fn set_alarm(&mut self, level: MotionLevel) {
        self.relay.set(level.is_high());
    }
}
